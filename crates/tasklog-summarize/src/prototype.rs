//! Nearest-prototype scoring shared by the model-backed classifiers.
//!
//! Each class is described by a handful of example phrases. The phrases are
//! embedded once, averaged into one centroid per class, and inputs go to the
//! class whose centroid is most similar.

use tasklog_embeddings::{Embedder, cosine_similarity, mean_vector};

use crate::error::{SummarizeError, check_len};

/// Embed every class's phrases in one batch and average them per class.
pub(crate) async fn embed_centroids<E: Embedder>(
    embedder: &E,
    classes: &[&[&str]],
) -> Result<Vec<Vec<f32>>, SummarizeError> {
    let phrases: Vec<String> = classes
        .iter()
        .flat_map(|phrases| phrases.iter().map(ToString::to_string))
        .collect();
    let vectors = embedder.embed(&phrases).await?;
    check_len("embedder", phrases.len(), vectors.len())?;

    let mut centroids = Vec::with_capacity(classes.len());
    let mut offset = 0;
    for phrases in classes {
        let members = &vectors[offset..offset + phrases.len()];
        offset += phrases.len();
        centroids.push(mean_vector(members).unwrap_or_default());
    }
    Ok(centroids)
}

/// Index of the most similar centroid. Ties go to the lower index.
pub(crate) fn nearest(vector: &[f32], centroids: &[Vec<f32>]) -> usize {
    let mut best = 0;
    let mut best_score = f32::NEG_INFINITY;
    for (i, centroid) in centroids.iter().enumerate() {
        let score = cosine_similarity(vector, centroid);
        if score > best_score {
            best = i;
            best_score = score;
        }
    }
    best
}
