// ============================================================
// Layer 3 — Remote Platform Value Types
// ============================================================
// Plain descriptions of what we ask the managed platform to do.
// These structs cross the trait boundary in domain/traits.rs;
// they carry no behaviour and no vendor types, so any backend
// (a real cloud client or the bundled in-memory stub) can
// consume them.

use std::collections::BTreeMap;

/// The compute shape a training job or endpoint runs on.
/// Opaque to this pipeline — the platform interprets it.
#[derive(Debug, Clone)]
pub struct InstanceSpec {
    pub instance_type:  String,
    pub instance_count: u32,
}

/// Training-time configuration passed through to the opaque
/// boosted-tree container. Only num_round is treated as a
/// first-class value; everything else rides in the free-form
/// map exactly as the container expects to receive it.
#[derive(Debug, Clone)]
pub struct Hyperparameters {
    pub num_round: u32,
    pub extra:     BTreeMap<String, String>,
}

impl Hyperparameters {
    /// The regression defaults for the boosted-tree container:
    /// shallow trees, conservative learning rate, squared-error
    /// objective.
    pub fn boosted_tree_defaults(num_round: u32) -> Self {
        let mut extra = BTreeMap::new();
        extra.insert("max_depth".to_string(), "5".to_string());
        extra.insert("eta".to_string(), "0.2".to_string());
        extra.insert("gamma".to_string(), "4".to_string());
        extra.insert("min_child_weight".to_string(), "6".to_string());
        extra.insert("subsample".to_string(), "0.7".to_string());
        extra.insert("objective".to_string(), "reg:squarederror".to_string());
        Self { num_round, extra }
    }

    /// Flatten into the single string map the platform submits
    /// to the container, num_round included.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        let mut map = self.extra.clone();
        map.insert("num_round".to_string(), self.num_round.to_string());
        map
    }
}

/// Everything the training platform needs to run one job.
#[derive(Debug, Clone)]
pub struct TrainingJobSpec {
    /// Unique name for the job on the platform
    pub job_name: String,

    /// Reference to the training container image
    pub container_image: String,

    /// Credential/role the platform assumes while running the job
    pub role: String,

    pub instance:        InstanceSpec,
    pub hyperparameters: Hyperparameters,

    /// Remote URIs of the staged CSV channels
    pub train_uri:      String,
    pub validation_uri: String,
}

/// Handle to a completed training job's output: the URI of the
/// binary model artifact, ready to be deployed.
#[derive(Debug, Clone)]
pub struct ModelArtifact {
    pub uri: String,
}
