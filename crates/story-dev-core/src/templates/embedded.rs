//! Compile-time embedded template trees.
//!
//! Each tree is a static list of [`TemplateFile`]s loaded with [`include_bytes!`]. The
//! paths are relative to this source file (`crates/story-dev-core/src/templates/embedded.rs`).
//!
//! ## Adding a file to a template
//!
//! 1. Place it under `templates/<template>/`
//! 2. Add an entry to the matching tree below, keeping paths sorted
//! 3. Name it `*.tmpl` if it contains Handlebars tokens, otherwise it is copied verbatim
//!
//! `tests::test_registration_tree_matches_disk` fails if the list and the directory
//! drift apart.

use super::TemplateFile;

macro_rules! template_file {
    ($template:literal, $path:literal) => {
        TemplateFile {
            path: $path,
            contents: include_bytes!(concat!("../../../../templates/", $template, "/", $path)),
        }
    };
}

// -------------------------------------------------------
// IP registration (Next.js + Story SDK)
// -------------------------------------------------------

pub static REGISTRATION: &[TemplateFile] = &[
    template_file!("registration", "README.md.tmpl"),
    template_file!("registration", "next-env.d.ts"),
    template_file!("registration", "next.config.js"),
    template_file!("registration", "package.json.tmpl"),
    template_file!("registration", "postcss.config.js"),
    template_file!("registration", "public/favicon.png"),
    template_file!("registration", "src/client/story.ts"),
    template_file!("registration", "src/components/RegisterIP.tsx"),
    template_file!("registration", "src/lib/constants.ts.tmpl"),
    template_file!("registration", "src/lib/env.ts"),
    template_file!("registration", "src/lib/types.ts"),
    template_file!("registration", "src/lib/utils.ts"),
    template_file!("registration", "src/pages/_app.tsx"),
    template_file!("registration", "src/pages/api/register.ts"),
    template_file!("registration", "src/pages/index.tsx"),
    template_file!("registration", "src/styles/globals.css"),
    template_file!("registration", "tailwind.config.js"),
    template_file!("registration", "tsconfig.json"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::path::{Path, PathBuf};

    fn collect(root: &Path, dir: &Path, out: &mut BTreeSet<String>) {
        for entry in std::fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                collect(root, &path, out);
            } else {
                let rel = path.strip_prefix(root).unwrap();
                let rel: Vec<String> = rel
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect();
                out.insert(rel.join("/"));
            }
        }
    }

    #[test]
    fn test_registration_tree_matches_disk() {
        let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../templates/registration");
        let mut on_disk = BTreeSet::new();
        collect(&root, &root, &mut on_disk);

        let embedded: BTreeSet<String> = REGISTRATION.iter().map(|f| f.path.to_string()).collect();
        assert_eq!(embedded, on_disk);
    }

    #[test]
    fn test_paths_are_sorted_and_relative() {
        let paths: Vec<&str> = REGISTRATION.iter().map(|f| f.path).collect();
        let mut sorted = paths.clone();
        sorted.sort_unstable();
        assert_eq!(paths, sorted);
        assert!(paths
            .iter()
            .all(|p| !p.starts_with('/') && !p.split('/').any(|s| s == ".." || s.is_empty())));
    }
}
