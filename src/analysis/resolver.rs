//! Dependency path resolution
//!
//! Dynamic dependency tokens may start with a linker placeholder instead of a
//! literal path. Each placeholder is a [`PlaceholderRule`] that rewrites the
//! prefix to a directory inside the app bundle. Adding a placeholder means
//! adding a variant and listing it in [`PlaceholderRule::ALL`].

use std::path::{Path, PathBuf};

/// A named rewrite rule for one linker placeholder prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderRule {
    /// `@rpath`: the runtime search path, `<bundle>/Frameworks`
    RuntimeSearchPath,
    /// `@executable_path`: the directory containing the main executable
    ExecutablePath,
    /// `@loader_path`: the directory containing the loading image; for the
    /// main executable this is the bundle root
    LoaderPath,
}

impl PlaceholderRule {
    /// Rules in the order they are tried
    pub const ALL: [PlaceholderRule; 3] = [
        PlaceholderRule::RuntimeSearchPath,
        PlaceholderRule::ExecutablePath,
        PlaceholderRule::LoaderPath,
    ];

    pub fn placeholder(self) -> &'static str {
        match self {
            PlaceholderRule::RuntimeSearchPath => "@rpath",
            PlaceholderRule::ExecutablePath => "@executable_path",
            PlaceholderRule::LoaderPath => "@loader_path",
        }
    }

    /// Directory the placeholder stands for
    pub fn base(self, bundle_root: &Path) -> PathBuf {
        match self {
            PlaceholderRule::RuntimeSearchPath => bundle_root.join("Frameworks"),
            PlaceholderRule::ExecutablePath | PlaceholderRule::LoaderPath => {
                bundle_root.to_path_buf()
            }
        }
    }

    /// Remainder of `token` after the placeholder, if the token starts with it
    ///
    /// The placeholder must be followed by `/` or end the token, so
    /// `@rpathology/x` does not match `@rpath`.
    pub fn strip<'a>(self, token: &'a str) -> Option<&'a str> {
        let rest = token.strip_prefix(self.placeholder())?;
        if rest.is_empty() || rest.starts_with('/') {
            Some(rest)
        } else {
            None
        }
    }

    /// Rewrite `token` into a candidate path, without checking existence
    pub fn rewrite(self, token: &str, bundle_root: &Path) -> Option<PathBuf> {
        let rest = self.strip(token)?;
        let base = self.base(bundle_root);
        let relative = rest.trim_start_matches('/');
        if relative.is_empty() {
            Some(base)
        } else {
            Some(base.join(relative))
        }
    }

    /// First rule whose placeholder prefixes `token`
    pub fn matching(token: &str) -> Option<PlaceholderRule> {
        Self::ALL.into_iter().find(|rule| rule.strip(token).is_some())
    }
}

/// Candidate path for a token: the placeholder rewrite, or the literal path
pub fn candidate_path(token: &str, bundle_root: &Path) -> PathBuf {
    match PlaceholderRule::matching(token).and_then(|rule| rule.rewrite(token, bundle_root)) {
        Some(path) => path,
        None => PathBuf::from(token),
    }
}

/// Resolve a dependency token to an existing file, or `None` if unresolved
///
/// A token that starts with a placeholder is only ever checked at its
/// rewritten location.
pub fn resolve_dependency(token: &str, bundle_root: &Path) -> Option<PathBuf> {
    if token.is_empty() {
        return None;
    }
    let candidate = candidate_path(token, bundle_root);
    if candidate.is_file() {
        log::debug!("resolved {token} -> {}", candidate.display());
        Some(candidate)
    } else {
        log::debug!("could not resolve {token} (tried {})", candidate.display());
        None
    }
}
