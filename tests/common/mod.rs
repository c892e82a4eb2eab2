// Shared helpers for integration tests
#![allow(dead_code)]

use git2::{Repository, Signature};
use std::fs;
use std::path::Path;

/// Initialise a repository at `path` with one commit on HEAD.
pub fn init_repo(path: &Path) -> Repository {
    fs::create_dir_all(path).unwrap();
    let repo = Repository::init(path).unwrap();
    {
        let sig = Signature::now("Test", "test@example.com").unwrap();
        let tree_id = repo.index().unwrap().write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        repo.commit(Some("HEAD"), &sig, &sig, "initial", &tree, &[])
            .unwrap();
    }
    repo
}

/// Create lightweight tags on HEAD.
pub fn tag_head(repo: &Repository, tags: &[&str]) {
    let head = repo.head().unwrap().peel_to_commit().unwrap();
    for tag in tags {
        repo.tag_lightweight(tag, head.as_object(), false).unwrap();
    }
}

pub fn tag_names(repo: &Repository) -> Vec<String> {
    let mut tags: Vec<String> = repo
        .tag_names(None)
        .unwrap()
        .iter()
        .flatten()
        .map(|s| s.to_string())
        .collect();
    tags.sort();
    tags
}
