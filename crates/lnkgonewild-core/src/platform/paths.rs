//! Lexical Windows path normalization.
//!
//! Nothing here touches the filesystem: `..` is resolved against the previous
//! component, not against what exists on disk.

const SEP: char = '\\';

/// Split a path into its drive prefix and the rest.
///
/// The prefix is `C:`, a UNC `\\server\share`, or a bare `\\` when the UNC
/// path names no share.
fn split_prefix(path: &str) -> (&str, &str) {
    if let Some(unc) = path.strip_prefix("\\\\") {
        let share_end = unc.find(SEP).filter(|&i| i > 0).and_then(|server_len| {
            let share = &unc[server_len + 1..];
            let share_len = share.find(SEP).unwrap_or(share.len());
            (share_len > 0).then_some(2 + server_len + 1 + share_len)
        });
        return path.split_at(share_end.unwrap_or(2));
    }
    let bytes = path.as_bytes();
    if bytes.len() >= 2 && bytes[1] == b':' && bytes[0].is_ascii_alphabetic() {
        return path.split_at(2);
    }
    ("", path)
}

/// Normalize a path to canonical Windows form.
///
/// Forward slashes become backslashes, repeated separators collapse, `.`
/// components are dropped and `..` removes the previous component. An empty
/// result becomes `.`.
pub fn normalize_windows_path(path: &str) -> String {
    let path = path.replace('/', "\\");
    let (prefix, rest) = split_prefix(&path);

    let absolute = rest.starts_with(SEP);
    let mut parts: Vec<&str> = Vec::new();
    for part in rest.split(SEP) {
        match part {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                // Cannot climb above a root
                _ if absolute || prefix.starts_with("\\\\") => {}
                _ => parts.push(".."),
            },
            _ => parts.push(part),
        }
    }

    let mut normalized = String::with_capacity(path.len());
    normalized.push_str(prefix);
    if absolute {
        normalized.push(SEP);
    }
    normalized.push_str(&parts.join("\\"));

    if normalized.is_empty() {
        ".".to_string()
    } else {
        normalized
    }
}

/// Directory part of a Windows path, normalized.
///
/// `C:\bin\app.exe` gives `C:\bin`, `C:\app.exe` gives `C:\` and a bare file
/// name gives `.`.
pub fn windows_parent(path: &str) -> String {
    let normalized = normalize_windows_path(path);
    let (prefix, rest) = split_prefix(&normalized);

    let head = match rest.rfind(SEP) {
        Some(idx) => &rest[..=idx],
        None => "",
    };
    let trimmed = head.trim_end_matches(SEP);
    let head = if trimmed.is_empty() { head } else { trimmed };

    normalize_windows_path(&format!("{prefix}{head}"))
}
