//! Test support utilities for validator behavioural tests.
//!
//! This module writes update and distribution fixtures to disk so scenarios
//! exercise the same zip and directory readers as the CLI.

use std::fs;
use std::io::Write;
use std::path::Path;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Resource files an update ships when nothing is omitted.
pub const RESOURCE_FILES: [&str; 5] = [
    "LICENSE.txt",
    "README.txt",
    "update-descriptor.yaml",
    "instructions.txt",
    "NOT_A_CONTRIBUTION.txt",
];

/// Writes a zip archive at `path`. Names ending in `/` become directories.
pub fn write_zip(path: &Path, entries: &[(String, Vec<u8>)]) {
    let file = fs::File::create(path).expect("create zip");
    let mut writer = ZipWriter::new(file);
    for (name, content) in entries {
        if name.ends_with('/') {
            writer
                .add_directory(name.as_str(), SimpleFileOptions::default())
                .expect("add directory");
        } else {
            writer
                .start_file(name.as_str(), SimpleFileOptions::default())
                .expect("start file");
            writer.write_all(content).expect("write entry");
        }
    }
    writer.finish().expect("finish zip");
}

/// Creates each relative file below `root`, with parent directories.
pub fn write_tree(root: &Path, files: &[String]) {
    fs::create_dir_all(root).expect("create root");
    for file in files {
        let path = root.join(file);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent");
        }
        fs::write(&path, b"content").expect("write file");
    }
}

/// Renders a descriptor declaring `added` as newly added files.
pub fn descriptor_yaml(added: &[String]) -> String {
    let mut yaml = String::from("update_number: \"0001\"\nfile_changes:\n  added_files:");
    if added.is_empty() {
        yaml.push_str(" []\n");
    } else {
        yaml.push('\n');
        for path in added {
            yaml.push_str(&format!("    - {path}\n"));
        }
    }
    yaml.push_str("  removed_files: []\n  modified_files: []\n");
    yaml
}
