use std::io::Write;

use unloader_core::config::AppConfig;

use crate::commands::cli::ConfigArgs;
use crate::error::CliError;

pub fn render_config(cfg: &AppConfig, args: &ConfigArgs) -> Result<String, CliError> {
    if args.json {
        serde_json::to_string_pretty(cfg).map_err(|e| CliError::Command(e.to_string()))
    } else {
        Ok(cfg.to_toml_string()?)
    }
}

pub fn handle_config(cfg: &AppConfig, args: ConfigArgs) -> Result<i32, CliError> {
    let rendered = render_config(cfg, &args)?;
    write_config(&mut std::io::stdout().lock(), &rendered)?;
    Ok(0)
}

fn write_config(out: &mut impl Write, rendered: &str) -> Result<(), CliError> {
    writeln!(out, "{rendered}")?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_output_contains_manager_delay() {
        let out = render_config(&AppConfig::default(), &ConfigArgs { json: true }).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["manager"]["auto_hide_delay_ms"], 2000);
        assert_eq!(value["provider"]["kind"], "text");
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failure_is_io_error() {
        let err = write_config(&mut ClosedPipe, "[manager]").unwrap_err();
        assert!(matches!(err, CliError::Io(_)));
        assert_eq!(err.exit_code(), 20);
    }

    #[test]
    fn toml_output_has_sections() {
        let out = render_config(&AppConfig::default(), &ConfigArgs::default()).unwrap();
        assert!(out.contains("[manager]"));
        assert!(out.contains("auto_hide_delay_ms = 2000"));
    }
}
