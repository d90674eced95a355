//! Generate the home page

use anyhow::Result;
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode};
use std::sync::mpsc::channel;
use std::time::{Duration, Instant};

use crate::content::loader::ContentLoader;
use crate::generator::{GenerateReport, Generator};
use crate::Site;

/// Load content, run the home query and write the page
pub fn run(site: &Site) -> Result<GenerateReport> {
    let start = Instant::now();

    let index = ContentLoader::new(site)?.load()?;
    tracing::info!("Loaded {} articles", index.articles().len());

    let report = Generator::new(site)?.generate(&index)?;

    tracing::info!("Generated in {:.2}s", start.elapsed().as_secs_f64());
    Ok(report)
}

/// Block, regenerating whenever the sources or the config change.
///
/// `on_rebuild` sees the outcome of every regeneration; failures are logged
/// and watching continues. The site (and its config) is re-opened each time.
pub fn watch<F>(site: &Site, mut on_rebuild: F) -> Result<()>
where
    F: FnMut(&Result<GenerateReport>),
{
    let (tx, rx) = channel();
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    if site.source_dir.exists() {
        debouncer
            .watcher()
            .watch(&site.source_dir, RecursiveMode::Recursive)?;
        tracing::debug!("Watching: {:?}", site.source_dir);
    }
    if let Some(config_path) = Site::config_path(&site.base_dir) {
        debouncer
            .watcher()
            .watch(&config_path, RecursiveMode::NonRecursive)?;
        tracing::debug!("Watching: {:?}", config_path);
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    for events in rx {
        let events = match events {
            Ok(events) => events,
            Err(e) => {
                tracing::error!("Watch error: {:?}", e);
                continue;
            }
        };

        let relevant = events.iter().any(|e| !is_noise(&e.path));
        if !relevant {
            continue;
        }

        for event in &events {
            tracing::info!("File changed: {}", event.path.display());
        }

        let result = Site::new(&site.base_dir).and_then(|site| run(&site));
        if let Err(e) = &result {
            tracing::error!("Generation failed: {:#}", e);
        }
        on_rebuild(&result);
    }

    Ok(())
}

fn is_noise(path: &std::path::Path) -> bool {
    let path = path.to_string_lossy();
    path.contains(".git") || path.contains(".DS_Store") || path.ends_with('~')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_is_noise() {
        assert!(is_noise(Path::new("/site/source/.git/index")));
        assert!(is_noise(Path::new("/site/source/_posts/a.md~")));
        assert!(!is_noise(Path::new("/site/source/_posts/a.md")));
    }
}
