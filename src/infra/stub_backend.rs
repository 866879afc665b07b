// ============================================================
// Layer 5 — In-Memory Stub Backend
// ============================================================
// A complete stand-in for the managed platform: object store,
// training service and model host, all backed by one shared
// in-memory map.
//
// In production these three traits would be implemented by a
// real cloud SDK. The stub exists so the pipeline can run end
// to end with no account and no network, while still honouring
// the real wire contract at every boundary:
//
//   - put() returns a URI, and submit() can only see data that
//     was actually uploaded under that URI
//   - the "trained model" is derived from the staged train
//     channel (it is the mean of the label column)
//   - the endpoint answers CSV-in/CSV-out with exactly one
//     prediction per submitted row, and refuses requests after
//     delete()
//
// A label-mean model is a deliberately boring regressor, but it
// keeps every byte that crosses the trait seam honest — which
// is the part this pipeline is responsible for.
//
// Everything here is single-threaded by design (see the
// resource model): Rc<RefCell<...>> is the whole concurrency
// story.
//
// Reference: Rust Book §15 (Rc and RefCell)

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::data::encoder::encode_values;
use crate::domain::error::PipelineError;
use crate::domain::platform::{InstanceSpec, ModelArtifact, TrainingJobSpec};
use crate::domain::traits::{Endpoint, ModelHost, ObjectStore, TrainingPlatform};

type SharedObjects = Rc<RefCell<HashMap<String, Vec<u8>>>>;

/// Factory for the three stub collaborators. They share one
/// object map, so data staged through the store is visible to
/// the trainer, and artifacts written by the trainer are
/// visible to the host — same as in the real platform.
pub struct StubBackend {
    objects: SharedObjects,
}

impl StubBackend {
    pub fn new() -> Self {
        Self { objects: Rc::new(RefCell::new(HashMap::new())) }
    }

    pub fn store(&self) -> InMemoryStore {
        InMemoryStore { objects: Rc::clone(&self.objects) }
    }

    pub fn platform(&self) -> MeanModelTrainer {
        MeanModelTrainer { objects: Rc::clone(&self.objects) }
    }

    pub fn host(&self) -> LocalHost {
        LocalHost { objects: Rc::clone(&self.objects) }
    }

    /// Look up a stored object by URI. Test helper.
    pub fn object(&self, uri: &str) -> Option<Vec<u8>> {
        self.objects.borrow().get(uri).cloned()
    }
}

impl Default for StubBackend {
    fn default() -> Self {
        Self::new()
    }
}

// ─── ObjectStore ──────────────────────────────────────────────────────────────

/// HashMap-backed blob store. URIs use a mem:// scheme so they
/// can never be mistaken for real remote locations in logs.
pub struct InMemoryStore {
    objects: SharedObjects,
}

impl ObjectStore for InMemoryStore {
    fn put(&self, bytes: &[u8], bucket: &str, key: &str) -> Result<String, PipelineError> {
        let uri = format!("mem://{bucket}/{key}");
        self.objects.borrow_mut().insert(uri.clone(), bytes.to_vec());
        Ok(uri)
    }
}

// ─── TrainingPlatform ─────────────────────────────────────────────────────────

/// "Trains" by averaging the label column of the staged train
/// channel and storing that mean as the model artifact.
pub struct MeanModelTrainer {
    objects: SharedObjects,
}

impl TrainingPlatform for MeanModelTrainer {
    fn submit(&self, job: &TrainingJobSpec) -> Result<ModelArtifact, PipelineError> {
        tracing::info!(
            "Stub training job '{}' starting ({} round(s), image {})",
            job.job_name,
            job.hyperparameters.num_round,
            job.container_image,
        );
        tracing::debug!("Container hyperparameters: {:?}", job.hyperparameters.to_map());

        let channel = |uri: &str| -> Result<Vec<u8>, PipelineError> {
            self.objects.borrow().get(uri).cloned().ok_or_else(|| {
                PipelineError::RemoteService(format!("training channel '{uri}' not found"))
            })
        };

        let train_bytes = channel(&job.train_uri)?;
        // The validation channel is not used by the mean model,
        // but a real platform would refuse a job whose channel
        // config points nowhere, so the stub does too
        channel(&job.validation_uri)?;

        let mean = label_mean(&train_bytes)?;

        let uri = format!("mem://artifacts/{}/model.bin", job.job_name);
        self.objects
            .borrow_mut()
            .insert(uri.clone(), mean.to_string().into_bytes());

        tracing::info!("Stub training job '{}' complete: artifact {uri}", job.job_name);
        Ok(ModelArtifact { uri })
    }
}

/// Mean of the first (label) column of a training batch.
fn label_mean(bytes: &[u8]) -> Result<f64, PipelineError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| PipelineError::RemoteService(format!("train channel is not UTF-8: {e}")))?;

    let mut sum   = 0.0f64;
    let mut count = 0usize;

    for line in text.lines().filter(|l| !l.trim().is_empty()) {
        let label = line.split(',').next().unwrap_or("");
        let value = label.parse::<f64>().map_err(|_| {
            PipelineError::RemoteService(format!("train channel label '{label}' is not numeric"))
        })?;
        sum += value;
        count += 1;
    }

    if count == 0 {
        return Err(PipelineError::RemoteService("train channel is empty".to_string()));
    }

    Ok(sum / count as f64)
}

// ─── ModelHost ────────────────────────────────────────────────────────────────

/// Deploys a mean-model artifact as an in-process endpoint.
pub struct LocalHost {
    objects: SharedObjects,
}

impl ModelHost for LocalHost {
    fn deploy(
        &self,
        artifact: &ModelArtifact,
        instance: &InstanceSpec,
    ) -> Result<Box<dyn Endpoint>, PipelineError> {
        let bytes = self.objects.borrow().get(&artifact.uri).cloned().ok_or_else(|| {
            PipelineError::RemoteService(format!("model artifact '{}' not found", artifact.uri))
        })?;

        let mean = std::str::from_utf8(&bytes)
            .ok()
            .and_then(|s| s.trim().parse::<f64>().ok())
            .ok_or_else(|| {
                PipelineError::RemoteService(format!(
                    "model artifact '{}' is not a mean-model artifact",
                    artifact.uri
                ))
            })?;

        tracing::info!(
            "Stub endpoint deployed ({} x {})",
            instance.instance_count,
            instance.instance_type,
        );

        Ok(Box::new(MeanEndpoint { mean, deleted: Cell::new(false) }))
    }
}

/// An endpoint that predicts the training-label mean for every
/// row it is asked about.
pub struct MeanEndpoint {
    mean:    f64,
    deleted: Cell<bool>,
}

impl Endpoint for MeanEndpoint {
    fn invoke(&self, csv_body: &str) -> Result<String, PipelineError> {
        if self.deleted.get() {
            return Err(PipelineError::RemoteService(
                "endpoint has been deleted".to_string(),
            ));
        }

        // One prediction per non-empty request line, returned as
        // a single comma-separated line — the same response shape
        // the real container produces
        let rows = csv_body.lines().filter(|l| !l.trim().is_empty()).count();
        Ok(encode_values(&vec![self.mean; rows]))
    }

    fn delete(&self) -> Result<(), PipelineError> {
        self.deleted.set(true);
        tracing::info!("Stub endpoint deleted");
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::decoder;
    use crate::domain::platform::Hyperparameters;

    fn job(train_uri: &str, validation_uri: &str) -> TrainingJobSpec {
        TrainingJobSpec {
            job_name:        "job-1".to_string(),
            container_image: "boosted-tree:latest".to_string(),
            role:            "pipeline-runner".to_string(),
            instance: InstanceSpec {
                instance_type:  "m5.large".to_string(),
                instance_count: 1,
            },
            hyperparameters: Hyperparameters::boosted_tree_defaults(50),
            train_uri:       train_uri.to_string(),
            validation_uri:  validation_uri.to_string(),
        }
    }

    #[test]
    fn test_put_returns_mem_uri() {
        let backend = StubBackend::new();
        let uri = backend.store().put(b"abc", "bucket", "prefix/x.csv").unwrap();
        assert_eq!(uri, "mem://bucket/prefix/x.csv");
        assert_eq!(backend.object(&uri).unwrap(), b"abc");
    }

    #[test]
    fn test_train_deploy_invoke_cycle() {
        let backend = StubBackend::new();
        let store   = backend.store();

        // Labels 8, 10, 12 → mean 10
        let train_uri = store.put(b"8,1,0,0\n10,0,1,0\n12,0,0,1", "b", "train.csv").unwrap();
        let val_uri   = store.put(b"9,1,0,0", "b", "validation.csv").unwrap();

        let artifact = backend.platform().submit(&job(&train_uri, &val_uri)).unwrap();
        let endpoint = backend
            .host()
            .deploy(&artifact, &job(&train_uri, &val_uri).instance)
            .unwrap();

        let response = endpoint.invoke("1,0,0,0.4\n0,1,0,0.5").unwrap();
        let predictions = decoder::decode(&response).unwrap();

        assert_eq!(predictions, vec![10.0, 10.0]);
    }

    #[test]
    fn test_missing_channel_is_remote_error() {
        let backend = StubBackend::new();
        let err = backend
            .platform()
            .submit(&job("mem://b/nope.csv", "mem://b/nope2.csv"))
            .unwrap_err();
        assert!(matches!(err, PipelineError::RemoteService(_)));
    }

    #[test]
    fn test_empty_train_channel_is_remote_error() {
        let backend = StubBackend::new();
        let store   = backend.store();
        let train_uri = store.put(b"", "b", "train.csv").unwrap();
        let val_uri   = store.put(b"9,1", "b", "validation.csv").unwrap();
        let err = backend.platform().submit(&job(&train_uri, &val_uri)).unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_invoke_after_delete_fails() {
        let backend = StubBackend::new();
        let store   = backend.store();
        let train_uri = store.put(b"5,1,0,0", "b", "train.csv").unwrap();
        let val_uri   = store.put(b"5,1,0,0", "b", "validation.csv").unwrap();

        let artifact = backend.platform().submit(&job(&train_uri, &val_uri)).unwrap();
        let endpoint = backend
            .host()
            .deploy(&artifact, &job(&train_uri, &val_uri).instance)
            .unwrap();

        endpoint.delete().unwrap();
        assert!(endpoint.invoke("1,0,0").is_err());
    }
}
