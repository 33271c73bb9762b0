use std::path::{Path, PathBuf};

use futures::StreamExt;
use tokio::io::AsyncWriteExt;

use crate::{ModelError, Result, SpeechModel};

/// Downloads `model` into `dir`, reporting `(downloaded, total)` after each
/// chunk. The body streams into a `.part` file that is only renamed into
/// place once the declared length has fully arrived, so an interrupted
/// download never leaves a half-written model under the final name.
pub async fn download_model<F>(
    model: &SpeechModel,
    dir: &Path,
    mut on_progress: F,
) -> Result<PathBuf>
where
    F: FnMut(u64, u64),
{
    let dest = dir.join(model.name);
    if dest.exists() {
        tracing::info!("Skipping {} (already downloaded)", model.name);
        return Ok(dest);
    }

    tokio::fs::create_dir_all(dir).await?;

    let part = dir.join(format!("{}.part", model.name));

    let client = reqwest::Client::new();
    let response = client
        .get(model.url)
        .send()
        .await
        .map_err(|e| ModelError::Http(e.to_string()))?;

    if !response.status().is_success() {
        return Err(ModelError::Http(format!(
            "HTTP {}: {}",
            response.status(),
            model.url
        )));
    }

    let total = response.content_length().unwrap_or(0);

    tracing::info!("Downloading {} to {:?}", model.url, dest);

    let mut file = tokio::fs::File::create(&part).await?;
    let outcome = write_body(response, &mut file, total, &mut on_progress).await;
    drop(file);

    let downloaded = match outcome {
        Ok(downloaded) => downloaded,
        Err(err) => {
            let _ = tokio::fs::remove_file(&part).await;
            return Err(err);
        }
    };

    if total > 0 && downloaded != total {
        let _ = tokio::fs::remove_file(&part).await;
        return Err(ModelError::IncompleteDownload {
            expected: total,
            got: downloaded,
        });
    }

    tokio::fs::rename(&part, &dest).await?;

    tracing::info!("Downloaded {} ({} bytes)", model.name, downloaded);

    Ok(dest)
}

/// Streams the response body into `file`. Returns the bytes written; on
/// failure the caller removes the partial file.
async fn write_body<F>(
    response: reqwest::Response,
    file: &mut tokio::fs::File,
    total: u64,
    on_progress: &mut F,
) -> Result<u64>
where
    F: FnMut(u64, u64),
{
    let mut stream = response.bytes_stream();
    let mut downloaded = 0u64;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| ModelError::Http(e.to_string()))?;
        file.write_all(&chunk).await?;
        downloaded += chunk.len() as u64;
        on_progress(downloaded, total);
    }

    file.flush().await?;
    Ok(downloaded)
}
