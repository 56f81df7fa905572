use crate::config::WalkOptions;
use crate::error::{EngineError, Result};
use crossbeam_channel::Sender;
use ignore::WalkBuilder;
use ignore::overrides::OverrideBuilder;
use std::path::PathBuf;

/// Parallel recursive directory walk.
///
/// Every regular file under `options.roots` is sent to `tx`. Explicitly
/// named files are always sent, even when ignore rules would skip them.
/// Missing roots and unreadable entries go to `err_tx`; the walk carries on
/// with the remaining inputs.
///
/// # Errors
/// Returns an error if an exclude pattern is invalid.
pub fn walk_parallel(
    options: &WalkOptions,
    tx: &Sender<PathBuf>,
    err_tx: &Sender<EngineError>,
) -> Result<()> {
    let mut dirs = Vec::new();
    for root in &options.roots {
        if root.is_file() {
            let _ = tx.send(root.clone());
        } else if root.is_dir() {
            dirs.push(root);
        } else {
            let _ = err_tx.send(EngineError::FileRead {
                path: root.clone(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            });
        }
    }

    let Some((first, rest)) = dirs.split_first() else {
        return Ok(());
    };

    let mut builder = WalkBuilder::new(first);
    for root in rest {
        builder.add(root);
    }

    builder
        .threads(options.threads)
        .hidden(!options.hidden)
        .git_ignore(options.git_ignore)
        .follow_links(options.follow_links);

    if let Some(depth) = options.max_depth {
        builder.max_depth(Some(depth));
    }

    // Exclude patterns use the `!` prefix convention.
    if !options.exclude.is_empty() {
        let mut ov_builder = OverrideBuilder::new(first);
        for ov in &options.exclude {
            ov_builder.add(&format!("!{ov}"))?;
        }
        builder.overrides(ov_builder.build()?);
    }

    let walker = builder.build_parallel();
    walker.run(|| {
        let tx = tx.clone();
        let err_tx = err_tx.clone();
        Box::new(move |entry| {
            match entry {
                Ok(entry) if entry.file_type().is_some_and(|ft| ft.is_file()) => {
                    let _ = tx.send(entry.into_path());
                }
                Ok(_) => {}
                Err(e) => {
                    log::warn!("walk: {e}");
                    let _ = err_tx.send(EngineError::Walk(e));
                }
            }
            ignore::WalkState::Continue
        })
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WalkOptionsBuilder;
    use std::fs;

    fn collect_all(options: &WalkOptions) -> Result<(Vec<PathBuf>, Vec<EngineError>)> {
        let (tx, rx) = crossbeam_channel::unbounded();
        let (err_tx, err_rx) = crossbeam_channel::unbounded();
        walk_parallel(options, &tx, &err_tx)?;
        drop(tx);
        drop(err_tx);
        let mut paths: Vec<_> = rx.into_iter().collect();
        paths.sort();
        Ok((paths, err_rx.into_iter().collect()))
    }

    fn collect(options: &WalkOptions) -> Result<Vec<PathBuf>> {
        collect_all(options).map(|(paths, _)| paths)
    }

    #[test]
    fn walks_directories_and_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("lib")).unwrap();
        fs::write(dir.path().join("lib/a.c"), "a\n").unwrap();
        fs::write(dir.path().join("b.c"), "b\n").unwrap();
        fs::write(dir.path().join(".hidden.c"), "h\n").unwrap();

        let options = WalkOptionsBuilder::default()
            .roots(vec![dir.path().to_path_buf()])
            .build()
            .unwrap();
        let paths = collect(&options).unwrap();
        assert_eq!(
            paths,
            vec![dir.path().join("b.c"), dir.path().join("lib/a.c")]
        );
    }

    #[test]
    fn hidden_flag_includes_dotfiles() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".hidden.c"), "h\n").unwrap();
        let options = WalkOptionsBuilder::default()
            .roots(vec![dir.path().to_path_buf()])
            .hidden(true)
            .build()
            .unwrap();
        assert_eq!(collect(&options).unwrap().len(), 1);
    }

    #[test]
    fn exclude_patterns_prune() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("vendor")).unwrap();
        fs::write(dir.path().join("vendor/x.c"), "x\n").unwrap();
        fs::write(dir.path().join("y.c"), "y\n").unwrap();
        let options = WalkOptionsBuilder::default()
            .roots(vec![dir.path().to_path_buf()])
            .exclude(vec!["vendor/".to_string()])
            .build()
            .unwrap();
        assert_eq!(collect(&options).unwrap(), vec![dir.path().join("y.c")]);
    }

    #[test]
    fn explicit_file_root_is_sent() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("only.c");
        fs::write(&file, "x\n").unwrap();
        let options = WalkOptionsBuilder::default()
            .roots(vec![file.clone()])
            .build()
            .unwrap();
        assert_eq!(collect(&options).unwrap(), vec![file]);
    }

    #[test]
    fn missing_root_does_not_stop_other_roots() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/long.c"), "x\n").unwrap();
        let missing = dir.path().join("missing.c");
        let options = WalkOptionsBuilder::default()
            .roots(vec![missing.clone(), dir.path().join("src")])
            .build()
            .unwrap();

        let (paths, errors) = collect_all(&options).unwrap();
        assert_eq!(paths, vec![dir.path().join("src/long.c")]);
        assert_eq!(errors.len(), 1);
        assert!(matches!(&errors[0], EngineError::FileRead { .. }));
        assert_eq!(errors[0].path(), Some(missing.as_path()));
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_is_reported_when_following_links() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.c"), "a\n").unwrap();
        let dangling = dir.path().join("dangling.c");
        std::os::unix::fs::symlink(dir.path().join("nowhere.c"), &dangling).unwrap();
        let options = WalkOptionsBuilder::default()
            .roots(vec![dir.path().to_path_buf()])
            .follow_links(true)
            .build()
            .unwrap();

        let (paths, errors) = collect_all(&options).unwrap();
        assert_eq!(paths, vec![dir.path().join("a.c")]);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path(), Some(dangling.as_path()));
    }
}
