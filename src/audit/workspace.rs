//! ページファイルの探索

use std::path::{
    Path,
    PathBuf,
};

use ignore::WalkBuilder;

use crate::config::PageMatcher;

/// サイトルート以下のページファイルを検索
///
/// `.gitignore` を尊重し、`matcher` の include/exclude パターンで絞り込む。
/// 結果はパス順にソートされる。
pub(super) fn find_pages(matcher: &PageMatcher) -> Vec<PathBuf> {
    let site_root = matcher.site_root();
    let mut found_files = Vec::new();

    // ignore クレートでファイルを走査
    for result in WalkBuilder::new(site_root)
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .follow_links(false)
        .build()
    {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(?err, "Failed to read directory entry");
                continue;
            }
        };

        // ファイルのみを対象
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();
        if !matcher.is_page(path) {
            continue;
        }

        found_files.push(path.to_path_buf());
    }

    found_files.sort();
    tracing::debug!(site_root = %site_root.display(), count = found_files.len(), "Found pages");
    found_files
}

/// `path` をサイトルートからの相対パスにする（ルート外ならそのまま）
pub(super) fn relative_to<'a>(path: &'a Path, site_root: &Path) -> &'a Path {
    path.strip_prefix(site_root).unwrap_or(path)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;
    use crate::config::SiteSettings;

    #[rstest]
    fn find_pages_respects_patterns() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("en")).unwrap();
        fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
        fs::create_dir_all(root.join("assets")).unwrap();
        fs::write(root.join("index.html"), "").unwrap();
        fs::write(root.join("en/about.html"), "").unwrap();
        fs::write(root.join("node_modules/pkg/demo.html"), "").unwrap();
        fs::write(root.join("assets/main.js"), "").unwrap();

        let matcher = PageMatcher::new(root.to_path_buf(), &SiteSettings::default()).unwrap();
        let pages = find_pages(&matcher);

        let relative: Vec<_> = pages.iter().map(|p| relative_to(p, root).to_path_buf()).collect();
        assert_eq!(relative, vec![PathBuf::from("en/about.html"), PathBuf::from("index.html")]);
    }

    #[rstest]
    fn relative_to_outside_root_is_unchanged() {
        let path = Path::new("/elsewhere/index.html");

        assert_eq!(relative_to(path, Path::new("/site")), path);
    }
}
