//! コマンドの位置引数・オプションを定義

use clap::Parser;

#[derive(Debug, Parser)]
#[command(version, about = "Search for PATTERN in each FILE, or standard input.")]
pub struct Args {
    #[arg(short = 'E', long = "regexp", value_name = "PATTERN")]
    /// マッチさせるパターンを指定する。
    pub pattern: Option<String>,

    #[arg(short = 'r', long = "recursive")]
    /// PATH をディレクトリとして再帰的に検索する。
    pub recursive: bool,

    #[arg(value_name = "PATH")]
    /// 検索するファイル、もしくは (-r と合わせて) ディレクトリ。
    /// 指定がない場合は標準入力を読む。
    pub paths: Vec<String>,
}
