//! JSON export of decoded frames.
//!
//! Frames are written as a single JSON array so plotting scripts can load
//! a whole animation in one read.

use crate::render::Frame;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when exporting or re-reading plate output.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid frame JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write frames to `path` as a JSON array.
pub fn save_frames(path: &Path, frames: &[Frame]) -> Result<(), ExportError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, frames)?;
    writer.flush()?;

    log::info!("Wrote {} frames to {}", frames.len(), path.display());
    Ok(())
}

/// Read frames previously written by [`save_frames`].
pub fn load_frames(path: &Path) -> Result<Vec<Frame>, ExportError> {
    let file = File::open(path)?;
    let frames = serde_json::from_reader(BufReader::new(file))?;
    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Perspective, Plate, SceneRecord, DEFAULT_ANGLE_TOLERANCE};
    use crate::render::render_frame;
    use nalgebra::Vector3;

    #[test]
    fn test_save_load_roundtrip() {
        use tempfile::NamedTempFile;

        let mut plate = Plate::new(-2, -2, 5, 5).unwrap();
        let camera = Vector3::new(0.0, 0.0, -30.0);
        plate.encode([SceneRecord::new(
            camera,
            camera,
            vec![Vector3::new(0.0, 0.0, 4.0), Vector3::new(-2.0, 1.0, 0.0)],
        )]);
        let frame = render_frame(&plate, &Perspective::following_light(camera), DEFAULT_ANGLE_TOLERANCE);
        assert_eq!(frame.visible_count(), 2);

        let temp_file = NamedTempFile::new().unwrap();
        save_frames(temp_file.path(), &[frame.clone()]).unwrap();
        let loaded = load_frames(temp_file.path()).unwrap();

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].cells, frame.cells);
        assert_eq!(loaded[0].perspective.camera, camera);
        assert_eq!(loaded[0].outline.len(), 5);
    }

    #[test]
    fn test_load_rejects_garbage() {
        use tempfile::NamedTempFile;

        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{{\"not\": \"frames\"}}").unwrap();

        let result = load_frames(temp_file.path());
        assert!(matches!(result, Err(ExportError::Json(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_frames(Path::new("/definitely/not/here/frames.json"));
        assert!(matches!(result, Err(ExportError::Io(_))));
    }
}
