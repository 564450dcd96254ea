use crate::error::ConvertError;
use constants::render_settings::DEFAULT_MAX_POINTS;
use std::path::PathBuf;

/// Command line options: `<input> [--max-points N] [--output DIR]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertArgs {
    pub input: PathBuf,
    pub max_points: usize,
    /// Defaults to the input file's directory.
    pub output_dir: Option<PathBuf>,
}

impl ConvertArgs {
    pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, ConvertError> {
        let mut input = None;
        let mut max_points = DEFAULT_MAX_POINTS;
        let mut output_dir = None;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--max-points" => {
                    let value = args
                        .next()
                        .ok_or_else(|| ConvertError::Usage("--max-points needs a value".into()))?;
                    max_points = value
                        .parse::<usize>()
                        .ok()
                        .filter(|n| *n > 0)
                        .ok_or_else(|| {
                            ConvertError::Usage(format!("invalid --max-points value '{value}'"))
                        })?;
                }
                "--output" => {
                    let value = args
                        .next()
                        .ok_or_else(|| ConvertError::Usage("--output needs a directory".into()))?;
                    output_dir = Some(PathBuf::from(value));
                }
                flag if flag.starts_with("--") => {
                    return Err(ConvertError::Usage(format!("unknown option '{flag}'")));
                }
                path => {
                    if input.replace(PathBuf::from(path)).is_some() {
                        return Err(ConvertError::Usage("only one input file is accepted".into()));
                    }
                }
            }
        }

        let input = input.ok_or_else(|| ConvertError::Usage("missing input file".into()))?;
        Ok(Self {
            input,
            max_points,
            output_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<ConvertArgs, ConvertError> {
        ConvertArgs::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn defaults() {
        let args = parse(&["scan.laz"]).unwrap();
        assert_eq!(args.input, PathBuf::from("scan.laz"));
        assert_eq!(args.max_points, DEFAULT_MAX_POINTS);
        assert_eq!(args.output_dir, None);
    }

    #[test]
    fn options_in_any_order() {
        let args = parse(&["--output", "out", "scan.ply", "--max-points", "5000"]).unwrap();
        assert_eq!(args.input, PathBuf::from("scan.ply"));
        assert_eq!(args.max_points, 5000);
        assert_eq!(args.output_dir, Some(PathBuf::from("out")));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["a.las", "b.las"]).is_err());
        assert!(parse(&["a.las", "--max-points", "0"]).is_err());
        assert!(parse(&["a.las", "--max-points"]).is_err());
        assert!(parse(&["a.las", "--verbose"]).is_err());
    }
}
