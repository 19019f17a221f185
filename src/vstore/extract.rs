/// Guess MIME type from filename extension for an upload.
///
/// Covers the document types vector stores index; anything else is sent as
/// `application/octet-stream` and left for the service to accept or reject.
pub fn guess_mime_type(filename: &str) -> &'static str {
    let ext = match filename.rsplit_once('.') {
        Some((_, ext)) => ext.to_lowercase(),
        None => String::new(),
    };
    match ext.as_str() {
        "txt" => "text/plain",
        "md" | "markdown" => "text/markdown",
        "csv" => "text/csv",
        "json" => "application/json",
        "html" | "htm" => "text/html",
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "tex" => "text/x-tex",
        "c" => "text/x-c",
        "cpp" => "text/x-c++",
        "java" => "text/x-java",
        "py" => "text/x-python",
        "rb" => "text/x-ruby",
        "go" => "text/x-golang",
        "js" => "text/javascript",
        "ts" => "application/typescript",
        "sh" => "application/x-sh",
        "css" => "text/css",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_extensions_are_case_insensitive() {
        assert_eq!(guess_mime_type("Policy.PDF"), "application/pdf");
        assert_eq!(guess_mime_type("notes.md"), "text/markdown");
    }

    #[test]
    fn unknown_or_missing_extension_is_octet_stream() {
        assert_eq!(guess_mime_type("archive.zip"), "application/octet-stream");
        assert_eq!(guess_mime_type("README"), "application/octet-stream");
    }
}
