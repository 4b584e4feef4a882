use std::fs;
use std::path::Path;

use anyhow::Context;

use crate::aggregate::GroupingTree;

/// Write the grouping tree as `{content_type}/{domain_category}/{theme}.txt`
/// under `root`, one URL per line, plus `unreachable.txt` at the root when
/// any fetches failed. Directory creation is create-if-absent.
pub fn write_output(
    root: &Path,
    tree: &GroupingTree,
    unreachable: &[String],
) -> anyhow::Result<()> {
    fs::create_dir_all(root)
        .with_context(|| format!("creating output directory {}", root.display()))?;

    if !unreachable.is_empty() {
        write_url_list(&root.join("unreachable.txt"), unreachable)?;
    }

    for (content_type, domains) in tree {
        for (domain_category, themes) in domains {
            let dir = root.join(safe_name(content_type)).join(safe_name(domain_category));
            fs::create_dir_all(&dir)
                .with_context(|| format!("creating {}", dir.display()))?;
            for (theme, urls) in themes {
                write_url_list(&dir.join(format!("{}.txt", safe_name(theme))), urls)?;
            }
        }
    }

    Ok(())
}

fn write_url_list(path: &Path, urls: &[String]) -> anyhow::Result<()> {
    let mut body = urls.join("\n");
    body.push('\n');
    fs::write(path, body).with_context(|| format!("writing {}", path.display()))
}

/// Remote labels are open vocabulary; keep them out of the path machinery.
fn safe_name(label: &str) -> String {
    label.replace(['/', '\\'], "-")
}

// ── Tests ──
