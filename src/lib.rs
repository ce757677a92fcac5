#![forbid(unsafe_code)]

pub mod camera;
pub mod compare;
pub mod ease;
pub mod engine;
pub mod error;
pub mod mask;
pub mod matcher;
pub mod scene;
pub mod silhouette;
pub mod transition;
pub mod tween;

pub use camera::{AuxCamera, CameraState, RenderTarget, Viewport};
pub use compare::{SimilarityScore, compare};
pub use ease::Ease;
pub use engine::{EngineConfig, MatchEngine, TickDelta};
pub use error::{SiluetError, SiluetResult};
pub use mask::MaskImage;
pub use matcher::{CheckReport, MatchMonitor, MatchState};
pub use scene::{Feedback, LevelLoader, MaterialId, ObjectId, Scene};
pub use silhouette::SilhouetteRenderer;
pub use transition::{RevealTransition, TransitionState};
