use crate::cli::ValidateArgs;
use crate::exit_codes;
use crate::output;
use artifact_rs::FileType;
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct ValidateOutput {
    file: String,
    exists: bool,
    readable: bool,
    supported: bool,
    file_type: Option<FileType>,
    size_bytes: Option<u64>,
    error: Option<String>,
}

fn inspect(file: &str) -> ValidateOutput {
    let path = Path::new(file);

    let exists = path.exists();
    let readable = path.is_file() && std::fs::File::open(path).is_ok();

    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let file_type = FileType::from_extension(extension);
    let supported = file_type.is_some();

    let size_bytes = if readable {
        std::fs::metadata(path).ok().map(|m| m.len())
    } else {
        None
    };

    let error = if !exists {
        Some(format!("File not found: {}", file))
    } else if !readable {
        Some(format!("File is not readable: {}", file))
    } else if !supported {
        Some(format!(
            "Unsupported file extension '{}'. Supported: asc, ascii, txt, dat, csv, tsv",
            extension
        ))
    } else if size_bytes == Some(0) {
        Some(format!("File is empty: {}", file))
    } else {
        None
    };

    ValidateOutput {
        file: file.to_string(),
        exists,
        readable,
        supported,
        file_type,
        size_bytes,
        error,
    }
}

pub fn execute(args: ValidateArgs) -> i32 {
    let result = inspect(&args.file);

    if args.json {
        match output::to_json(&result, false) {
            Ok(json) => {
                if let Err(e) = output::write_output(&json, None) {
                    eprintln!("Error: {}", e);
                    return exit_codes::EXECUTION_ERROR;
                }
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                return exit_codes::EXECUTION_ERROR;
            }
        }
    } else if let Some(ref err) = result.error {
        eprintln!("Error: {}", err);
    } else {
        println!(
            "File '{}' is valid ({}, {} bytes)",
            args.file,
            result
                .file_type
                .map(|ft| format!("{:?}", ft))
                .unwrap_or_default(),
            result.size_bytes.unwrap_or(0)
        );
    }

    if result.error.is_some() {
        exit_codes::INPUT_ERROR
    } else {
        exit_codes::SUCCESS
    }
}
