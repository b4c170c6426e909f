use std::path::PathBuf;

use anyhow::{bail, Context};
use pixgrid::RunOptions;

const USAGE: &str = "usage: pixgrid [--config PATH] [--out DIR] [SCRIPT]";

/// Returns `None` when only the usage was requested.
fn parse_args(mut args: impl Iterator<Item = String>) -> anyhow::Result<Option<RunOptions>> {
    let mut options = RunOptions {
        output_dir: PathBuf::from("."),
        ..RunOptions::default()
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args.next().context("--config needs a path")?;
                options.config = Some(PathBuf::from(path));
            }
            "--out" => {
                let dir = args.next().context("--out needs a directory")?;
                options.output_dir = PathBuf::from(dir);
            }
            "-h" | "--help" => return Ok(None),
            flag if flag.starts_with("--") => bail!("unknown flag {flag}\n{USAGE}"),
            script => {
                if options.script.is_some() {
                    bail!("only one script may be given\n{USAGE}");
                }
                options.script = Some(PathBuf::from(script));
            }
        }
    }

    Ok(Some(options))
}

fn main() -> anyhow::Result<()> {
    let Some(options) = parse_args(std::env::args().skip(1))? else {
        println!("{USAGE}");
        return Ok(());
    };
    let report = pixgrid::run(options).context("pixgrid run failed")?;
    for path in &report.exports {
        println!("{}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|arg| arg.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn help_requests_usage_without_error() {
        assert!(parse_args(args(&["--help"])).expect("help is not an error").is_none());
        assert!(parse_args(args(&["-h"])).expect("help is not an error").is_none());
    }

    #[test]
    fn parses_flags_and_script() {
        let options = parse_args(args(&["--out", "dist", "--config", "cfg.json", "art.txt"]))
            .expect("arguments should parse")
            .expect("options should be returned");
        assert_eq!(options.output_dir, PathBuf::from("dist"));
        assert_eq!(options.config, Some(PathBuf::from("cfg.json")));
        assert_eq!(options.script, Some(PathBuf::from("art.txt")));
    }

    #[test]
    fn rejects_unknown_flags_and_extra_scripts() {
        assert!(parse_args(args(&["--verbose"])).is_err());
        assert!(parse_args(args(&["a.txt", "b.txt"])).is_err());
        assert!(parse_args(args(&["--out"])).is_err());
    }
}
