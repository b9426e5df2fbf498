use std::collections::HashMap;

use crate::Result;

/// Static assets bundled for offline play, mirroring the game's service
/// worker manifest.
pub const DEFAULT_MANIFEST: &[&str] = &[
    "./",
    "./index.html",
    "./scan.js",
    "./songs.json",
    "./manifest.json",
    "https://unpkg.com/html5-qrcode",
];

/// Source the cache falls back to when an asset has not been stored.
pub trait AssetFetcher {
    fn fetch(&mut self, path: &str) -> Result<Vec<u8>>;
}

/// Cache-first asset store with fetch fallback.
#[derive(Debug, Default)]
pub struct AssetCache {
    entries: HashMap<String, Vec<u8>>,
}

impl AssetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches and stores every asset in the manifest. Any single failure
    /// aborts the pass, matching install-time cache semantics.
    pub fn precache(&mut self, manifest: &[&str], fetcher: &mut dyn AssetFetcher) -> Result<()> {
        for path in manifest {
            let body = fetcher.fetch(path)?;
            self.entries.insert((*path).to_string(), body);
        }
        Ok(())
    }

    /// Serves an asset cache-first, falling back to the fetcher for anything
    /// not stored. Fallback responses are not cached.
    pub fn get(&mut self, path: &str, fetcher: &mut dyn AssetFetcher) -> Result<Vec<u8>> {
        if let Some(body) = self.entries.get(path) {
            return Ok(body.clone());
        }
        fetcher.fetch(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    struct MapFetcher {
        responses: HashMap<String, Vec<u8>>,
        calls: usize,
    }

    impl MapFetcher {
        fn new(entries: &[(&str, &str)]) -> Self {
            Self {
                responses: entries
                    .iter()
                    .map(|(path, body)| ((*path).to_string(), body.as_bytes().to_vec()))
                    .collect(),
                calls: 0,
            }
        }
    }

    impl AssetFetcher for MapFetcher {
        fn fetch(&mut self, path: &str) -> Result<Vec<u8>> {
            self.calls += 1;
            self.responses
                .get(path)
                .cloned()
                .ok_or_else(|| {
                    io::Error::new(io::ErrorKind::NotFound, format!("no such asset `{path}`"))
                        .into()
                })
        }
    }

    #[test]
    fn precache_then_serve_without_refetching() {
        let mut fetcher = MapFetcher::new(&[("./index.html", "<html>"), ("./scan.js", "js")]);
        let mut cache = AssetCache::new();

        cache
            .precache(&["./index.html", "./scan.js"], &mut fetcher)
            .unwrap();
        assert_eq!(cache.len(), 2);
        assert_eq!(fetcher.calls, 2);

        let body = cache.get("./index.html", &mut fetcher).unwrap();
        assert_eq!(body, b"<html>");
        assert_eq!(fetcher.calls, 2, "cached asset must not hit the fetcher");
    }

    #[test]
    fn uncached_asset_falls_back_to_fetch() {
        let mut fetcher = MapFetcher::new(&[("./songs.json", "[]")]);
        let mut cache = AssetCache::new();

        let body = cache.get("./songs.json", &mut fetcher).unwrap();
        assert_eq!(body, b"[]");
        assert!(!cache.contains("./songs.json"));
    }

    #[test]
    fn precache_fails_when_any_asset_is_missing() {
        let mut fetcher = MapFetcher::new(&[("./index.html", "<html>")]);
        let mut cache = AssetCache::new();

        let result = cache.precache(&["./index.html", "./missing"], &mut fetcher);
        assert!(result.is_err());
    }
}
