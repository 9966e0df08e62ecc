//! Image resolution pass.
//!
//! Import only records image URLs with a placeholder size. This pass fetches
//! each image once, embeds it as a `data:` URL and stores its real
//! dimensions. All images of a tree resolve concurrently; a failure leaves
//! that node untouched and is logged.

use crate::error::{FormatError, ImageError};
use crate::formats::markdown::parser::MarkdownImporter;
use crate::tree::{ImageSize, MindMapRoot};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use futures::future::join_all;
use std::io::Cursor;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Where `assets/…` images live in the note application.
pub const DEFAULT_ASSET_BASE_URL: &str = "http://127.0.0.1:6806/";

/// An image ready to be stored on a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedImage {
    /// `data:<mime>;base64,<payload>`
    pub embedded: String,
    pub width: u32,
    pub height: u32,
}

/// Turns an image URL into embedded data plus dimensions.
#[async_trait]
pub trait ImageResolver: Send + Sync {
    async fn resolve(&self, url: &str) -> Result<ResolvedImage, ImageError>;
}

/// Outcome counts of one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImagePassSummary {
    pub resolved: usize,
    pub failed: usize,
}

/// Resolve every non-embedded image in the tree.
///
/// Returns once every resolution has settled. Nodes whose image is already a
/// `data:` URL are skipped.
pub async fn resolve_images(tree: &mut MindMapRoot, resolver: &dyn ImageResolver) -> ImagePassSummary {
    let pending = tree.data_mut().into_iter().filter_map(|data| {
        let url = data.image.clone()?;
        if url.starts_with("data:") {
            return None;
        }
        Some(async move {
            match resolver.resolve(&url).await {
                Ok(image) => {
                    debug!(url = %url, width = image.width, height = image.height, "resolved image");
                    data.image = Some(image.embedded);
                    data.image_size = Some(ImageSize {
                        width: image.width,
                        height: image.height,
                    });
                    true
                }
                Err(err) => {
                    warn!(url = %url, error = %err, "keeping placeholder for unresolved image");
                    false
                }
            }
        })
    });

    let outcomes = join_all(pending).await;
    let resolved = outcomes.iter().filter(|ok| **ok).count();
    ImagePassSummary {
        resolved,
        failed: outcomes.len() - resolved,
    }
}

/// Import Markdown, then run the image pass over the result.
pub async fn import_with_images(
    importer: &MarkdownImporter,
    source: &str,
    resolver: &dyn ImageResolver,
) -> Result<MindMapRoot, FormatError> {
    let mut tree = importer.import(source)?;
    resolve_images(&mut tree, resolver).await;
    Ok(tree)
}

/// Sniff, measure and embed raw image bytes.
pub fn embed_image(bytes: &[u8]) -> Result<ResolvedImage, ImageError> {
    let format = image::guess_format(bytes).map_err(|e| ImageError::Decode(e.to_string()))?;
    let (width, height) = image::ImageReader::with_format(Cursor::new(bytes), format)
        .into_dimensions()
        .map_err(|e| ImageError::Decode(e.to_string()))?;

    Ok(ResolvedImage {
        embedded: format!("data:{};base64,{}", format.to_mime_type(), BASE64.encode(bytes)),
        width,
        height,
    })
}

/// Settings for [`HttpImageResolver`].
#[derive(Debug, Clone, PartialEq)]
pub struct ImageResolverOptions {
    /// Base URL that `assets/…` paths are joined onto.
    pub asset_base_url: String,
    /// Per-request timeout for remote fetches.
    pub timeout: Duration,
    /// Directory relative local paths are read from; the working directory
    /// when unset.
    pub base_dir: Option<PathBuf>,
}

impl Default for ImageResolverOptions {
    fn default() -> Self {
        ImageResolverOptions {
            asset_base_url: DEFAULT_ASSET_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
            base_dir: None,
        }
    }
}

/// Where an image URL points.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ImageSource {
    Remote(String),
    Local(PathBuf),
}

/// Fetches remote images over HTTP(S) and reads local ones from disk.
#[derive(Debug, Clone)]
pub struct HttpImageResolver {
    options: ImageResolverOptions,
    #[cfg(feature = "http-images")]
    client: reqwest::Client,
}

impl HttpImageResolver {
    pub fn new(options: ImageResolverOptions) -> Result<Self, ImageError> {
        #[cfg(feature = "http-images")]
        let client = reqwest::Client::builder()
            .timeout(options.timeout)
            .build()
            .map_err(|e| ImageError::Fetch(format!("cannot build HTTP client: {e}")))?;

        Ok(HttpImageResolver {
            options,
            #[cfg(feature = "http-images")]
            client,
        })
    }

    fn locate(&self, url: &str) -> Result<ImageSource, ImageError> {
        if url.starts_with("assets/") {
            let joined = Url::parse(&self.options.asset_base_url)
                .and_then(|base| base.join(url))
                .map_err(|e| ImageError::Unsupported(format!("{url}: {e}")))?;
            return Ok(ImageSource::Remote(joined.into()));
        }

        match Url::parse(url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {
                Ok(ImageSource::Remote(parsed.into()))
            }
            Ok(parsed) if parsed.scheme() == "file" => parsed
                .to_file_path()
                .map(ImageSource::Local)
                .map_err(|_| ImageError::Unsupported(url.to_string())),
            // single letters are Windows drive prefixes, not schemes
            Ok(parsed) if parsed.scheme().len() > 1 => Err(ImageError::Unsupported(url.to_string())),
            _ => {
                let path = PathBuf::from(url);
                Ok(ImageSource::Local(match &self.options.base_dir {
                    Some(dir) if path.is_relative() => dir.join(path),
                    _ => path,
                }))
            }
        }
    }

    #[cfg(feature = "http-images")]
    async fn fetch_remote(&self, url: &str) -> Result<Vec<u8>, ImageError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ImageError::Fetch(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImageError::Fetch(format!("{url} returned {status}")));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ImageError::Fetch(format!("{url}: {e}")))?;
        Ok(bytes.to_vec())
    }

    #[cfg(not(feature = "http-images"))]
    async fn fetch_remote(&self, url: &str) -> Result<Vec<u8>, ImageError> {
        Err(ImageError::Unsupported(format!(
            "{url} (built without the http-images feature)"
        )))
    }
}

#[async_trait]
impl ImageResolver for HttpImageResolver {
    async fn resolve(&self, url: &str) -> Result<ResolvedImage, ImageError> {
        let bytes = match self.locate(url)? {
            ImageSource::Remote(remote) => self.fetch_remote(&remote).await?,
            ImageSource::Local(path) => tokio::fs::read(&path)
                .await
                .map_err(|e| ImageError::Fetch(format!("{}: {e}", path.display())))?,
        };
        embed_image(&bytes)
    }
}
