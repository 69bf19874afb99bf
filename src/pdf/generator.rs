use std::path::PathBuf;
use std::process::Command;

use uuid::Uuid;

use crate::core::{DocumentError, DocumentResult};
use crate::templates::RenderedDocument;

/// Compiles rendered Typst source to PDF by shelling out to the `typst`
/// binary. Each job gets its own scratch directory so asset file names
/// never collide across concurrent requests.
pub struct PdfGenerator {
    typst_bin: String,
    temp_dir: PathBuf,
}

impl PdfGenerator {
    pub fn new(typst_bin: String, temp_dir: PathBuf) -> Self {
        PdfGenerator {
            typst_bin,
            temp_dir,
        }
    }

    /// True when the configured Typst binary answers `--version`.
    pub fn is_available(&self) -> bool {
        Command::new(&self.typst_bin)
            .arg("--version")
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    pub async fn generate(&self, document: &RenderedDocument) -> DocumentResult<Vec<u8>> {
        let job_dir = self.temp_dir.join(format!("doc_{}", Uuid::new_v4()));
        tokio::fs::create_dir_all(&job_dir).await?;

        let result = self.compile_in(&job_dir, document).await;

        // Best-effort cleanup; a leftover scratch dir is not an error.
        let _ = tokio::fs::remove_dir_all(&job_dir).await;

        result
    }

    async fn compile_in(
        &self,
        job_dir: &PathBuf,
        document: &RenderedDocument,
    ) -> DocumentResult<Vec<u8>> {
        let typ_path = job_dir.join("document.typ");
        let pdf_path = job_dir.join("document.pdf");

        tokio::fs::write(&typ_path, &document.typst_source).await?;
        for asset in &document.assets {
            tokio::fs::write(job_dir.join(&asset.file_name), &asset.bytes).await?;
        }

        let output = tokio::task::spawn_blocking({
            let typst_bin = self.typst_bin.clone();
            let typ_path = typ_path.clone();
            let pdf_path = pdf_path.clone();
            move || {
                Command::new(&typst_bin)
                    .arg("compile")
                    .arg(&typ_path)
                    .arg(&pdf_path)
                    .output()
            }
        })
        .await
        .map_err(|e| DocumentError::Generation(format!("compile task panicked: {}", e)))??;

        if !output.status.success() {
            return Err(DocumentError::Generation(format!(
                "typst compilation failed: {}",
                String::from_utf8_lossy(&output.stderr)
            )));
        }

        Ok(tokio::fs::read(&pdf_path).await?)
    }
}
