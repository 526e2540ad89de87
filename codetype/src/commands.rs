use std::io::Write;
use std::path::Path;

use crate::config::{Config, OutputFormat};
use crate::error::Error;
use crate::replay::{self, ReplayReport, Replayer};

/// Print one line per lesson
pub fn list(config: &Config, out: &mut impl Write) -> Result<(), Error> {
    for lesson in config.list_lessons() {
        writeln!(
            out,
            "{:<12} {:<24} [{}] {}",
            lesson.id,
            lesson.title,
            lesson.file_names().join(", "),
            lesson.tags.join(", ")
        )?;
    }
    Ok(())
}

/// Print the segment layout of a lesson file
pub fn check(
    config: &Config,
    lesson_id: &str,
    file: Option<&str>,
    out: &mut impl Write,
) -> Result<(), Error> {
    let lesson = config.lesson(lesson_id)?;
    let file = lesson.file(file)?;
    let reference = &file.reference;

    writeln!(out, "{} / {} ({})", lesson.title, file.name, file.language)?;
    writeln!(out, "{}", lesson.description)?;
    writeln!(
        out,
        "{} characters, {} typed, {} auto-filled, {} segments",
        reference.len(),
        reference.typed_len(),
        reference.len() - reference.typed_len(),
        reference.segments().len()
    )?;

    for segment in reference.segment_refs() {
        let first_line = reference.chars()[segment.start..segment.end]
            .iter()
            .take_while(|char| **char != '\n')
            .collect::<String>();
        writeln!(
            out,
            "  {:>5}..{:<5} {:<4} {}",
            segment.start, segment.end, segment.kind, first_line
        )?;
    }

    Ok(())
}

/// Replay a key script and print the report
pub fn replay(
    config: &Config,
    lesson_id: &str,
    keys: &Path,
    file: Option<&str>,
    format: Option<OutputFormat>,
    out: &mut impl Write,
) -> Result<(), Error> {
    let lesson = config.lesson(lesson_id)?;
    let file = lesson.file(file)?;
    let tokens = replay::read_script(keys)?;
    log::info!(
        "Replaying {} tokens against {}/{}",
        tokens.len(),
        lesson.id,
        file.name
    );

    let mut replayer = Replayer::new(
        file.reference.clone(),
        config.settings.session_configuration(),
        config.settings.keystroke_ms,
    );
    replayer.run(&tokens);

    let report = replayer.report(&lesson.id, &file.name);
    write_report(
        &report,
        format.unwrap_or(config.settings.output_format),
        out,
    )
}

fn write_report(
    report: &ReplayReport,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<(), Error> {
    match format {
        OutputFormat::Toml => write!(out, "{}", toml::to_string_pretty(report)?)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn config() -> (tempfile::TempDir, Config) {
        let dir = tempdir().unwrap();
        let config = Config::get(Some(dir.path().to_path_buf())).unwrap();
        (dir, config)
    }

    fn output(write: impl FnOnce(&mut Vec<u8>) -> Result<(), Error>) -> String {
        let mut out = Vec::new();
        write(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_list() {
        let (_dir, config) = config();
        let listing = output(|out| list(&config, out));
        let lines: Vec<&str> = listing.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("basics"));
        assert!(lines[0].contains("JavaScript Warmup"));
        assert!(lines[0].contains("[main.js]"));
        assert!(lines[1].contains("[main.ts, utils.ts]"));
    }

    #[test]
    fn test_check() {
        let (_dir, config) = config();
        let summary = output(|out| check(&config, "helpers", Some("utils.ts"), out));
        let mut lines = summary.lines();

        assert_eq!(
            lines.next(),
            Some("TypeScript Helpers / utils.ts (typescript)")
        );
        assert_eq!(
            lines.next(),
            Some("Write small utilities and use them in a clean main file.")
        );
        assert!(lines.next().unwrap().ends_with("2 segments"));
        assert!(lines.next().unwrap().contains("auto"));
        assert!(lines.next().unwrap().contains("export const clamp"));
    }

    #[test]
    fn test_check_unknown() {
        let (_dir, config) = config();
        let mut out = Vec::new();

        assert!(matches!(
            check(&config, "nope", None, &mut out),
            Err(Error::Lesson(_))
        ));
        assert!(matches!(
            check(&config, "basics", Some("main.ts"), &mut out),
            Err(Error::Lesson(_))
        ));
    }

    #[test]
    fn test_replay_json() {
        let (dir, _) = config();
        let lessons_dir = dir.path().join("lessons");
        std::fs::write(
            lessons_dir.join("tiny.toml"),
            "title = \"Tiny\"\ndescription = \"One line\"\n\n[[files]]\nname = \"a.js\"\ncontent = \"ok();\\n}\"\nline_kinds = [\"type\", \"auto\"]\n",
        )
        .unwrap();
        let config = Config::get(Some(dir.path().to_path_buf())).unwrap();

        let keys = dir.path().join("tiny.keys");
        std::fs::write(&keys, "ok();<Enter>").unwrap();

        let report = output(|out| {
            replay(&config, "tiny", &keys, None, Some(OutputFormat::Json), out)
        });
        let report: serde_json::Value = serde_json::from_str(&report).unwrap();

        assert_eq!(report["lesson"], "tiny");
        assert_eq!(report["file"], "a.js");
        assert_eq!(report["keys"], 6);
        assert_eq!(report["completed"], true);
        assert_eq!(report["input"], "ok();\n}");
        assert_eq!(report["result"]["accuracy"], 100);
        assert_eq!(report["result"]["start_time"], 200);
        assert_eq!(report["result"]["end_time"], 1200);
    }

    #[test]
    fn test_replay_toml_incomplete() {
        let (dir, config) = config();
        let keys = dir.path().join("partial.keys");
        std::fs::write(&keys, "cons").unwrap();

        let report = output(|out| replay(&config, "basics", &keys, None, None, out));

        assert!(report.contains("lesson = \"basics\""));
        assert!(report.contains("completed = false"));
        assert!(report.contains("keys = 4"));
        assert!(!report.contains("[result]"));
    }

    #[test]
    fn test_replay_missing_script() {
        let (dir, config) = config();
        let mut out = Vec::new();

        assert!(matches!(
            replay(
                &config,
                "basics",
                &dir.path().join("missing.keys"),
                None,
                None,
                &mut out
            ),
            Err(Error::Replay(_))
        ));
    }
}
