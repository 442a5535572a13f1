use thiserror::Error;

/// コマンドラインの指定に不正があった場合に出力するエラーの型
#[derive(Debug, Error)]
pub enum CliError {
    #[error("CliError: no pattern specified. Use -E <pattern>.")]
    NoPattern,
    #[error("CliError: -r requires exactly one directory argument.")]
    InvalidRecursiveUsage,
    #[error(transparent)]
    Parse(#[from] regex_core::error::ParseError),
}
