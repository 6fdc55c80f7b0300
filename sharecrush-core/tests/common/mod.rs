// Shared fake collaborators for exercising the pipelines without ffmpeg.
#![allow(dead_code)]

use sharecrush_core::{
    CoreError, CoreResult, EncodeRequest, MetadataProber, Resolution, VideoEncoder, VideoMetadata,
};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// Builds metadata for a fake video file.
pub fn metadata(res: &str, bitrate: u64) -> VideoMetadata {
    let resolution: Resolution = res.parse().unwrap();
    VideoMetadata {
        width: resolution.width,
        height: resolution.height,
        resolution,
        bitrate,
        frame_rate: 30.0,
        pix_fmt: "yuv420p".to_string(),
        codec: "h264".to_string(),
        profile: "Main".to_string(),
    }
}

/// One encode request as observed by the fake encoder.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedEncode {
    pub input: PathBuf,
    pub output: PathBuf,
    pub resolution: Resolution,
    pub crf: u8,
    pub codec: String,
    pub profile: String,
    pub pix_fmt: String,
}

impl RecordedEncode {
    fn from_request(request: &EncodeRequest<'_>) -> Self {
        Self {
            input: request.input.to_path_buf(),
            output: request.output.to_path_buf(),
            resolution: request.resolution,
            crf: request.crf,
            codec: request.codec.to_string(),
            profile: request.profile.to_string(),
            pix_fmt: request.pix_fmt.to_string(),
        }
    }
}

/// Fake prober and encoder sharing one piece of state.
///
/// Probing a registered path returns its canned metadata. "Encoding"
/// records the request and writes the candidate CRF into the output file;
/// probing an unregistered path reads that CRF back and reports the
/// bitrate given by `bitrate_for_crf`, which makes the CRF search loop
/// observable without a real encoder.
pub struct FakeToolkit {
    pub known: HashMap<PathBuf, VideoMetadata>,
    pub bitrate_for_crf: fn(u8) -> u64,
    pub encodes: RefCell<Vec<RecordedEncode>>,
    pub fail_encode_at_crf: Option<u8>,
    pub fail_probe_paths: HashSet<PathBuf>,
}

impl FakeToolkit {
    pub fn new(bitrate_for_crf: fn(u8) -> u64) -> Self {
        Self {
            known: HashMap::new(),
            bitrate_for_crf,
            encodes: RefCell::new(Vec::new()),
            fail_encode_at_crf: None,
            fail_probe_paths: HashSet::new(),
        }
    }

    pub fn register(&mut self, path: impl Into<PathBuf>, meta: VideoMetadata) {
        self.known.insert(path.into(), meta);
    }

    pub fn recorded(&self) -> Vec<RecordedEncode> {
        self.encodes.borrow().clone()
    }

    pub fn recorded_crfs(&self) -> Vec<u8> {
        self.encodes.borrow().iter().map(|e| e.crf).collect()
    }
}

impl MetadataProber for FakeToolkit {
    fn probe(&self, path: &Path) -> CoreResult<VideoMetadata> {
        if self.fail_probe_paths.contains(path) {
            return Err(CoreError::Probe(
                path.display().to_string(),
                "injected probe failure".to_string(),
            ));
        }
        if let Some(meta) = self.known.get(path) {
            return Ok(meta.clone());
        }
        // Scratch file written by the fake encoder.
        let contents = std::fs::read_to_string(path).map_err(|e| {
            CoreError::Probe(path.display().to_string(), e.to_string())
        })?;
        let crf: u8 = contents.trim().parse().map_err(|_| {
            CoreError::Probe(path.display().to_string(), "not a fake encode".to_string())
        })?;
        Ok(metadata("640x360", (self.bitrate_for_crf)(crf)))
    }
}

impl VideoEncoder for FakeToolkit {
    fn encode(&self, request: &EncodeRequest<'_>) -> CoreResult<()> {
        if self.fail_encode_at_crf == Some(request.crf) {
            return Err(CoreError::CommandFailed(
                "ffmpeg".to_string(),
                format!("injected encode failure at CRF {}", request.crf),
            ));
        }
        self.encodes
            .borrow_mut()
            .push(RecordedEncode::from_request(request));
        if let Some(parent) = request.output.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(request.output, request.crf.to_string())?;
        Ok(())
    }
}
