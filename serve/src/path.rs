use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Map a request path onto the static root, the way a plain file server does.
///
/// The query and fragment are dropped and the path is percent-decoded. `..` removes the
/// previous component but never climbs above `root`. A trailing `/` is kept.
pub fn translate_path(root: &Path, request_path: &str) -> PathBuf {
    let path = request_path
        .split(['?', '#'])
        .next()
        .unwrap_or_default();
    let path = percent_decode(path);

    let mut components = Vec::new();
    for component in path.split('/') {
        match component {
            "" | "." => {}
            ".." => {
                components.pop();
            }
            // `a\b` must not smuggle a separator in on windows
            _ if component.contains(std::path::MAIN_SEPARATOR) => {}
            _ => components.push(component),
        }
    }

    let mut translated = root.to_path_buf();
    translated.extend(components);

    if path.ends_with('/') {
        let mut with_separator = translated.into_os_string();
        with_separator.push(std::path::MAIN_SEPARATOR_STR);
        translated = PathBuf::from(with_separator);
    }

    translated
}

/// Translate the request path, then append `suffix` to the resulting file name.
///
/// `/index` becomes `<root>/index.json` for the suffix `.json`.
pub fn resolve_path(root: &Path, request_path: &str, suffix: &str) -> PathBuf {
    let mut resolved: OsString = translate_path(root, request_path).into_os_string();
    resolved.push(suffix);

    PathBuf::from(resolved)
}

/// Decode `%XX` escapes. Malformed escapes are kept verbatim, invalid utf-8 is replaced.
fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());

    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes
                .get(i + 1..i + 3)
                .filter(|pair| pair.iter().all(u8::is_ascii_hexdigit))
                .and_then(|pair| u8::from_str_radix(std::str::from_utf8(pair).ok()?, 16).ok());

            if let Some(byte) = hex {
                decoded.push(byte);
                i += 3;
                continue;
            }
        }

        decoded.push(bytes[i]);
        i += 1;
    }

    String::from_utf8_lossy(&decoded).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> PathBuf {
        PathBuf::from("static")
    }

    #[test]
    fn appends_suffix() {
        assert_eq!(
            resolve_path(&root(), "/index", ".json"),
            root().join("index.json")
        );
        assert_eq!(
            resolve_path(&root(), "/a/b", ".json"),
            root().join("a").join("b.json")
        );
    }

    #[test]
    fn suffix_is_appended_to_existing_extension() {
        assert_eq!(
            resolve_path(&root(), "/data.txt", ".json"),
            root().join("data.txt.json")
        );
    }

    #[test]
    fn root_request() {
        let mut expected = root().into_os_string();
        expected.push(std::path::MAIN_SEPARATOR_STR);
        expected.push(".json");

        assert_eq!(resolve_path(&root(), "/", ".json"), PathBuf::from(expected));
    }

    #[test]
    fn trailing_slash_is_kept() {
        let mut expected = root().join("dir").into_os_string();
        expected.push(std::path::MAIN_SEPARATOR_STR);

        assert_eq!(translate_path(&root(), "/dir/"), PathBuf::from(expected));
    }

    #[test]
    fn query_and_fragment_are_dropped() {
        assert_eq!(
            resolve_path(&root(), "/index?pretty=1#top", ".json"),
            root().join("index.json")
        );
        assert_eq!(
            resolve_path(&root(), "/index#top", ".json"),
            root().join("index.json")
        );
    }

    #[test]
    fn percent_escapes_are_decoded() {
        assert_eq!(
            resolve_path(&root(), "/my%20file", ".json"),
            root().join("my file.json")
        );
        assert_eq!(percent_decode("100%"), "100%");
        assert_eq!(percent_decode("%zz%41"), "%zzA");
        assert_eq!(percent_decode("%+a"), "%+a");
    }

    #[test]
    fn parent_components_are_normalized() {
        assert_eq!(
            resolve_path(&root(), "/a/b/../c", ".json"),
            root().join("a").join("c.json")
        );
    }

    #[test]
    fn cannot_escape_root() {
        assert_eq!(
            resolve_path(&root(), "/../../etc/passwd", ".json"),
            root().join("etc").join("passwd.json")
        );
        assert_eq!(
            resolve_path(&root(), "/a/%2e%2e/%2E%2E/b", ".json"),
            root().join("b.json")
        );
        assert_eq!(
            resolve_path(&root(), "//a/./b", ".json"),
            root().join("a").join("b.json")
        );
    }
}
