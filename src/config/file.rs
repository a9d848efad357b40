//! Line-oriented config file parsing
//!
//! ```text
//! # nightly documents backup
//! title: documents
//! source: /home/me/docs
//! dest: /mnt/backup/docs
//! excludefile: *.tmp, *.bak
//! option: noupdate
//!
//! source: /home/me/photos
//! dest: /mnt/backup/photos
//! option: log=/var/log/photos-backup.log
//! ```
//!
//! Blank lines separate blocks, one request per block.

use super::SyncRequestBuilder;
use crate::types::SyncError;
use std::path::{Path, PathBuf};

/// Read and parse a config file
///
/// Fails only when the file cannot be read. Problems inside a block are
/// reported per block so the other blocks still run.
pub fn load_config_file(path: &Path) -> Result<Vec<Result<SyncRequestBuilder, SyncError>>, SyncError> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        SyncError::Config(format!(
            "Config file {} could not be opened: {}",
            path.display(),
            e
        ))
    })?;
    Ok(parse_config(&text, path))
}

/// Parse config text into one builder (or the block's first error) per block
///
/// `path` is only used to label errors.
pub fn parse_config(text: &str, path: &Path) -> Vec<Result<SyncRequestBuilder, SyncError>> {
    let mut blocks = Vec::new();
    let mut current: Option<Block> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();

        if line.starts_with('#') {
            continue;
        }
        if line.is_empty() {
            if let Some(block) = current.take() {
                blocks.push(block.finish());
            }
            continue;
        }

        let block = current.get_or_insert_with(Block::default);
        if block.error.is_some() {
            continue;
        }
        if let Err(message) = apply_line(&mut block.builder, &line.replace('\t', " ")) {
            block.error = Some(SyncError::ConfigParse {
                path: path.to_path_buf(),
                line: line_no,
                message,
            });
        }
    }

    if let Some(block) = current.take() {
        blocks.push(block.finish());
    }
    blocks
}

#[derive(Default)]
struct Block {
    builder: SyncRequestBuilder,
    error: Option<SyncError>,
}

impl Block {
    fn finish(self) -> Result<SyncRequestBuilder, SyncError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.builder),
        }
    }
}

fn apply_line(builder: &mut SyncRequestBuilder, line: &str) -> Result<(), String> {
    // First ':' only, so "dest: C:\backup" keeps its drive letter.
    let (key, value) = line
        .split_once(':')
        .ok_or_else(|| format!("expected 'key: value', found '{line}'"))?;
    let key = key.trim().to_lowercase();
    let value = value.trim();

    match key.as_str() {
        "option" => apply_option(builder, value),
        "source" | "src" => {
            builder.source = Some(PathBuf::from(value));
            Ok(())
        }
        "dest" | "destination" => {
            builder.dest = Some(PathBuf::from(value));
            Ok(())
        }
        "target" | "tgt" => {
            builder.target = Some(PathBuf::from(value));
            Ok(())
        }
        "title" => {
            builder.title = Some(value.to_string());
            Ok(())
        }
        _ => {
            if apply_filter(builder, &key, value) {
                Ok(())
            } else {
                Err(format!("unknown key '{key}'"))
            }
        }
    }
}

/// Handles `option: name` and `option: name=value`
fn apply_option(builder: &mut SyncRequestBuilder, option: &str) -> Result<(), String> {
    let Some((name, value)) = option.split_once('=') else {
        return match option.to_lowercase().as_str() {
            "dryrun" => set(&mut builder.dry_run, true),
            "debug" => set(&mut builder.debug, true),
            "noupdate" => set(&mut builder.no_update, true),
            "noallext" => set(&mut builder.no_all_ext, true),
            _ => Err(format!("unrecognized option '{option}'")),
        };
    };

    let name = name.trim().to_lowercase();
    let value = value.trim();

    match name.as_str() {
        "dryrun" => set(&mut builder.dry_run, parse_bool(value)?),
        "debug" => set(&mut builder.debug, parse_bool(value)?),
        "noupdate" => set(&mut builder.no_update, parse_bool(value)?),
        "noallext" => set(&mut builder.no_all_ext, parse_bool(value)?),
        "allext" => set(&mut builder.no_all_ext, !parse_bool(value)?),
        "log" if !value.is_empty() => {
            builder.log_file = Some(PathBuf::from(value));
            Ok(())
        }
        _ => {
            if apply_filter(builder, &name, value) {
                Ok(())
            } else {
                Err(format!("unrecognized option '{option}'"))
            }
        }
    }
}

/// Appends patterns for one of the four filter keys; false for any other key
fn apply_filter(builder: &mut SyncRequestBuilder, key: &str, value: &str) -> bool {
    let list = match key {
        "excludedir" => &mut builder.exclude_dirs,
        "includedir" => &mut builder.include_dirs,
        "excludefile" => &mut builder.exclude_files,
        "includefile" => &mut builder.include_files,
        _ => return false,
    };
    list.extend(
        value
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string),
    );
    true
}

fn set(flag: &mut bool, value: bool) -> Result<(), String> {
    *flag = value;
    Ok(())
}

fn parse_bool(value: &str) -> Result<bool, String> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(format!("expected true or false, found '{value}'")),
    }
}
