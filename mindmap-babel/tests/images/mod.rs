//! Image resolution pass tests

use async_trait::async_trait;
use mindmap_babel::{
    import_with_images, resolve_images, ImageError, ImageResolver, ImageSize, MarkdownImporter,
    ResolvedImage,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Resolves `ok-*` URLs and fails everything else, recording each call.
#[derive(Default)]
struct RecordingResolver {
    calls: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

#[async_trait]
impl ImageResolver for RecordingResolver {
    async fn resolve(&self, url: &str) -> Result<ResolvedImage, ImageError> {
        self.calls.lock().unwrap().push(url.to_string());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        tokio::task::yield_now().await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if url.starts_with("ok-") {
            Ok(ResolvedImage {
                embedded: format!("data:image/png;base64,{url}"),
                width: 320,
                height: 200,
            })
        } else {
            Err(ImageError::Fetch(format!("{url}: unreachable")))
        }
    }
}

const DOC: &str = "\
# Gallery

![first](ok-1.png)

- ![second](broken.png)
- ![third](ok-3.png)
- ![inline](data:image/png;base64,AAAA)
";

#[tokio::test]
async fn test_import_with_images() {
    let resolver = RecordingResolver::default();
    let tree = import_with_images(&MarkdownImporter::default(), DOC, &resolver)
        .await
        .unwrap();

    let gallery = &tree.children[0];
    assert_eq!(gallery.data.image.as_deref(), Some("data:image/png;base64,ok-1.png"));
    assert_eq!(gallery.data.image_size, Some(ImageSize { width: 320, height: 200 }));

    let items = &gallery.children;
    assert_eq!(items[0].data.image.as_deref(), Some("broken.png"));
    assert_eq!(items[0].data.image_size, Some(ImageSize::default()));
    assert_eq!(items[1].data.image.as_deref(), Some("data:image/png;base64,ok-3.png"));
    assert_eq!(items[2].data.image.as_deref(), Some("data:image/png;base64,AAAA"));
}

#[tokio::test]
async fn test_each_image_resolved_once_concurrently() {
    let resolver = RecordingResolver::default();
    let mut tree = MarkdownImporter::default().import(DOC).unwrap();

    let summary = resolve_images(&mut tree, &resolver).await;
    assert_eq!(summary.resolved, 2);
    assert_eq!(summary.failed, 1);

    let mut calls = resolver.calls.lock().unwrap().clone();
    calls.sort();
    assert_eq!(calls, vec!["broken.png", "ok-1.png", "ok-3.png"]);
    assert_eq!(resolver.peak.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_tree_without_images() {
    let resolver = RecordingResolver::default();
    let mut tree = MarkdownImporter::default().import("# a\n\n- b\n").unwrap();
    let summary = resolve_images(&mut tree, &resolver).await;
    assert_eq!(summary.resolved + summary.failed, 0);
    assert!(resolver.calls.lock().unwrap().is_empty());
}
