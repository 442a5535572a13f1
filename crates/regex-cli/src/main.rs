use clap::Parser;
use regex_core::Regex;
use std::{
    fs::File,
    io::{BufRead, BufReader, Read, stdin},
    path::{Path, PathBuf},
};

mod cli;
pub mod error;

use cli::Args;
use error::CliError;

fn main() {
    let args = Args::parse();

    let pattern = match &args.pattern {
        Some(p) => p.clone(),
        None => {
            eprintln!("{}", CliError::NoPattern);
            std::process::exit(1);
        }
    };

    let regex = Regex::new(&pattern).unwrap_or_else(|e| {
        eprintln!("{}", CliError::from(e));
        std::process::exit(1);
    });

    let matched = if args.recursive {
        match run_recursive(&regex, &args.paths) {
            Ok(matched) => matched,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
    } else if args.paths.is_empty() {
        run_stdin(&regex)
    } else {
        run_files(&regex, &args.paths)
    };

    std::process::exit(if matched { 0 } else { 1 });
}

/// 標準入力を全て read し、マッチするかどうかを PASS/FAIL で表示する。
fn run_stdin(regex: &Regex) -> bool {
    let mut input = String::new();
    if stdin().read_to_string(&mut input).is_err() {
        return false;
    }
    let input = input.strip_suffix('\n').unwrap_or(&input);

    let matched = regex.is_match(input);
    println!("{}", if matched { "PASS" } else { "FAIL" });
    matched
}

/// ファイルを1つ以上読み込み、マッチした行を表示する。
/// ファイルが複数の場合のみ、行の前にファイル名を付ける。
fn run_files(regex: &Regex, files: &[String]) -> bool {
    let show_filename = files.len() > 1;
    let mut matched = false;
    for file in files {
        match File::open(file) {
            Ok(f) => {
                if match_reader(regex, BufReader::new(f), file, show_filename) {
                    matched = true;
                }
            }
            Err(e) => eprintln!("{file}: {e}"),
        }
    }
    matched
}

/// `-r` モード。唯一の引数がディレクトリであることを要求し、その下を再帰的に
/// 探索して各ファイルにマッチングをかける。読めないエントリは無視する。
fn run_recursive(regex: &Regex, paths: &[String]) -> Result<bool, CliError> {
    let [dir] = paths else {
        return Err(CliError::InvalidRecursiveUsage);
    };
    let root = Path::new(dir);
    if !root.is_dir() {
        return Err(CliError::InvalidRecursiveUsage);
    }

    let parent = root.parent().unwrap_or(root);
    let mut files = Vec::new();
    collect_files(root, &mut files);

    let mut matched = false;
    for path in files {
        let label = path
            .strip_prefix(parent)
            .unwrap_or(&path)
            .display()
            .to_string();
        if let Ok(f) = File::open(&path) {
            if match_reader(regex, BufReader::new(f), &label, true) {
                matched = true;
            }
        }
    }
    Ok(matched)
}

/// `dir` 以下のファイルパスを再帰的に集める。サブディレクトリが読めない場合は
/// そのディレクトリを黙ってスキップする。
fn collect_files(dir: &Path, out: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_files(&path, out);
        } else if path.is_file() {
            out.push(path);
        }
    }
}

/// 1行ずつ read し、マッチした行を表示する。読み込みエラーが起きたらそこで
/// 打ち切る。
fn match_reader<T: BufRead>(regex: &Regex, reader: T, label: &str, show_label: bool) -> bool {
    let mut matched = false;
    for line in reader.lines() {
        let Ok(line) = line else { break };
        if regex.is_match(&line) {
            matched = true;
            if show_label {
                println!("{label}:{line}");
            } else {
                println!("{line}");
            }
        }
    }
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_run_files_single_file_no_label() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "apple\nbanana\napple pie").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let regex = Regex::new("apple").unwrap();
        assert!(run_files(&regex, &[path]));
    }

    #[test]
    fn test_run_files_no_match_returns_false() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "banana\ncherry").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let regex = Regex::new("apple").unwrap();
        assert!(!run_files(&regex, &[path]));
    }

    #[test]
    fn test_run_files_multiple_files() {
        let mut file1 = NamedTempFile::new().unwrap();
        let mut file2 = NamedTempFile::new().unwrap();
        writeln!(file1, "no match here").unwrap();
        writeln!(file2, "apple tart").unwrap();

        let regex = Regex::new("apple").unwrap();
        let paths = vec![
            file1.path().to_str().unwrap().to_string(),
            file2.path().to_str().unwrap().to_string(),
        ];
        assert!(run_files(&regex, &paths));
    }

    #[test]
    fn test_run_files_missing_file_does_not_panic() {
        let regex = Regex::new("apple").unwrap();
        assert!(!run_files(&regex, &["no-such-file.txt".to_string()]));
    }

    #[test]
    fn test_run_recursive_walks_subdirectories() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("top.txt"), "apple\n").unwrap();
        let sub = dir.path().join("sub");
        std::fs::create_dir(&sub).unwrap();
        std::fs::write(sub.join("nested.txt"), "banana\napple pie\n").unwrap();

        let regex = Regex::new("apple").unwrap();
        let dir_path = dir.path().to_str().unwrap().to_string();
        let matched = run_recursive(&regex, &[dir_path]).unwrap();
        assert!(matched);
    }

    #[test]
    fn test_run_recursive_rejects_non_directory() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap().to_string();
        let regex = Regex::new("apple").unwrap();
        assert!(matches!(
            run_recursive(&regex, &[path]),
            Err(CliError::InvalidRecursiveUsage)
        ));
    }

    #[test]
    fn test_run_recursive_rejects_multiple_paths() {
        let regex = Regex::new("apple").unwrap();
        assert!(matches!(
            run_recursive(&regex, &["a".to_string(), "b".to_string()]),
            Err(CliError::InvalidRecursiveUsage)
        ));
    }
}
