//! Nerd Font icon mapping for remote entries.

use dbox_core::RemoteEntry;

/// Returns a Nerd Font icon for the given entry.
pub fn icon_for_entry(entry: &RemoteEntry) -> &'static str {
    if entry.is_folder() {
        return "\u{f07b} ";
    }
    entry
        .extension()
        .map_or("\u{f15b} ", |ext| icon_for_extension(&ext))
}

fn icon_for_extension(ext: &str) -> &'static str {
    match ext {
        // Documents
        "txt" | "text" => "\u{f15c} ",
        "md" | "markdown" => "\u{e73e} ",
        "pdf" => "\u{f1c1} ",
        "doc" | "docx" | "odt" | "pages" => "\u{f1c2} ",
        "xls" | "xlsx" | "csv" | "ods" | "numbers" => "\u{f1c3} ",
        "ppt" | "pptx" | "odp" | "key" => "\u{f1c4} ",
        "paper" => "\u{f15c} ",

        // Code & data
        "json" | "yaml" | "yml" | "toml" | "xml" => "\u{e60b} ",
        "rs" | "py" | "js" | "ts" | "go" | "sh" => "\u{f121} ",

        // Archives
        "zip" | "tar" | "gz" | "bz2" | "xz" | "7z" | "rar" => "\u{f410} ",

        // Images
        "png" | "jpg" | "jpeg" | "gif" | "bmp" | "webp" | "heic" | "tiff" | "svg" => "\u{f1c5} ",

        // Audio
        "mp3" | "wav" | "flac" | "ogg" | "aac" | "m4a" => "\u{f001} ",

        // Video
        "mp4" | "avi" | "mkv" | "mov" | "wmv" | "webm" => "\u{f03d} ",

        _ => "\u{f15b} ",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> RemoteEntry {
        RemoteEntry::file(name, &format!("/{name}"), 1, None)
    }

    #[test]
    fn folder_gets_folder_icon() {
        let entry = RemoteEntry::folder("Photos", "/photos");
        assert_eq!(icon_for_entry(&entry), "\u{f07b} ");
    }

    #[test]
    fn extension_is_case_insensitive() {
        assert_eq!(icon_for_entry(&file("IMG_001.JPG")), "\u{f1c5} ");
        assert_eq!(icon_for_entry(&file("report.pdf")), "\u{f1c1} ");
    }

    #[test]
    fn unknown_or_missing_extension_gets_default() {
        assert_eq!(icon_for_entry(&file("data.xyz")), "\u{f15b} ");
        assert_eq!(icon_for_entry(&file("Makefile")), "\u{f15b} ");
    }
}
