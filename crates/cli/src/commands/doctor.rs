//! `lectern doctor` — Diagnose configuration health.

use lectern_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("Lectern Doctor — Configuration Diagnostics");
    println!("==========================================\n");

    let mut issues = 0;

    let config = match AppConfig::load() {
        Ok(config) => {
            println!("  [ok] Configuration loaded");
            config
        }
        Err(e) => {
            println!("  [!!] Configuration invalid: {e}");
            return Ok(());
        }
    };

    if config.has_api_key() {
        println!("  [ok] GEMINI_API_KEY configured");
    } else {
        println!("  [!!] No API key — set GEMINI_API_KEY");
        issues += 1;
    }

    println!("  [ok] Model: {}", config.model);

    if config.syllabus_link.is_empty() {
        println!("  [--] SYLLABUS_LINK not set; disclaimer will carry an empty link");
    } else {
        println!("  [ok] Syllabus link: {}", config.syllabus_link);
    }

    for (what, path, directory) in [
        ("Syllabus document", config.materials.syllabus_path(), false),
        ("Essay document", config.materials.essay_path(), false),
        ("Midterm materials", config.materials.midterm_path(), true),
        ("Final materials", config.materials.final_path(), true),
        ("Transcripts", config.materials.transcripts_path(), true),
    ] {
        let ok = if directory {
            path.is_dir()
        } else {
            path.is_file()
        };
        if ok {
            println!("  [ok] {what}: {}", path.display());
        } else {
            println!("  [!!] {what} missing: {}", path.display());
            issues += 1;
        }
    }

    if config.survey.is_some() {
        println!("  [ok] Survey sink configured");
    } else {
        println!("  [--] Survey sink off (set all three QUALTRICS_* variables to enable)");
    }

    println!();
    if issues == 0 {
        println!("  All checks passed.");
    } else {
        println!("  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
