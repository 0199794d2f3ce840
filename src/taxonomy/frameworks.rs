use crate::models::DirectoryEntry;

/// Manifest filename (lowercase) to the frameworks it may indicate.
///
/// A manifest lists every candidate; no attempt is made to tell them apart
/// without reading file contents.
pub const FRAMEWORK_MANIFESTS: &[(&str, &[&str])] = &[
    (
        "package.json",
        &["react", "express", "next", "vue", "angular", "nestjs", "prisma"],
    ),
    ("pom.xml", &["spring"]),
    ("requirements.txt", &["django", "flask"]),
    ("gemfile", &["rails"]),
    ("composer.json", &["laravel"]),
    ("build.gradle", &["android", "spring"]),
];

/// Frameworks suggested by the manifests present in a root directory listing.
///
/// Duplicates are possible when several manifests share a candidate; callers
/// deduplicate.
pub fn detect_frameworks(entries: &[DirectoryEntry]) -> Vec<&'static str> {
    let mut frameworks = Vec::new();

    for entry in entries {
        let Some(name) = entry.name.as_deref() else {
            continue;
        };
        let name = name.to_lowercase();

        if let Some((_, candidates)) = FRAMEWORK_MANIFESTS
            .iter()
            .find(|(manifest, _)| *manifest == name)
        {
            frameworks.extend_from_slice(candidates);
        }
    }

    frameworks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(names: &[&str]) -> Vec<DirectoryEntry> {
        names.iter().map(|n| DirectoryEntry::named(n)).collect()
    }

    #[test]
    fn test_package_json_yields_all_candidates() {
        let detected = detect_frameworks(&listing(&["README.md", "package.json", "src"]));
        assert_eq!(
            detected,
            vec!["react", "express", "next", "vue", "angular", "nestjs", "prisma"]
        );
    }

    #[test]
    fn test_case_insensitive_match() {
        assert_eq!(detect_frameworks(&listing(&["Gemfile"])), vec!["rails"]);
        assert_eq!(detect_frameworks(&listing(&["POM.XML"])), vec!["spring"]);
    }

    #[test]
    fn test_duplicates_across_manifests_are_kept() {
        let detected = detect_frameworks(&listing(&["pom.xml", "build.gradle"]));
        assert_eq!(detected, vec!["spring", "android", "spring"]);
    }

    #[test]
    fn test_no_manifest_no_detection() {
        assert!(detect_frameworks(&listing(&["main.rs", "Cargo.toml"])).is_empty());
        assert!(detect_frameworks(&[]).is_empty());
        assert!(detect_frameworks(&[DirectoryEntry::default()]).is_empty());
    }
}
