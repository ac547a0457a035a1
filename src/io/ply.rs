//! PLY export of engraved cells.
//!
//! Writes one vertex per cell that holds at least one gradient, with the
//! mean engraved normal and the gradient count. Useful for eyeballing an
//! encode in any point-cloud viewer.

use crate::core::{normalize, Plate};
use crate::io::ExportError;
use nalgebra::Vector3;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Save every engraved cell of `plate` to an ASCII PLY point cloud.
pub fn save_engraved_ply(plate: &Plate, path: &Path) -> Result<usize, ExportError> {
    let engraved: Vec<_> = plate
        .cells()
        .iter()
        .filter(|cell| cell.gradient_count() > 0)
        .collect();

    let mut file = BufWriter::new(File::create(path)?);

    // Write PLY header
    writeln!(file, "ply")?;
    writeln!(file, "format ascii 1.0")?;
    writeln!(file, "element vertex {}", engraved.len())?;
    writeln!(file, "property int x")?;
    writeln!(file, "property int y")?;
    writeln!(file, "property int z")?;
    writeln!(file, "property double nx")?;
    writeln!(file, "property double ny")?;
    writeln!(file, "property double nz")?;
    writeln!(file, "property uint gradients")?;
    writeln!(file, "end_header")?;

    for cell in &engraved {
        let sum = cell
            .gradients()
            .iter()
            .fold(Vector3::<f64>::zeros(), |acc, g| acc + g);
        let mean = normalize(&sum);
        let coords = cell.coords();
        writeln!(
            file,
            "{} {} {} {} {} {} {}",
            coords.x,
            coords.y,
            coords.z,
            mean.x,
            mean.y,
            mean.z,
            cell.gradient_count()
        )?;
    }
    file.flush()?;

    log::info!("Wrote {} engraved cells to {}", engraved.len(), path.display());
    Ok(engraved.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SceneRecord;

    #[test]
    fn test_ply_lists_only_engraved_cells() {
        use tempfile::NamedTempFile;

        let mut plate = Plate::new(0, 0, 3, 3).unwrap();
        let camera = Vector3::new(1.0, 1.0, -20.0);
        plate.encode([SceneRecord::new(
            camera,
            camera,
            vec![Vector3::new(1.0, 1.0, 5.0), Vector3::new(1.0, 1.0, 9.0)],
        )]);

        let temp_file = NamedTempFile::new().unwrap();
        let written = save_engraved_ply(&plate, temp_file.path()).unwrap();
        assert_eq!(written, 1);

        let text = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(text.contains("element vertex 1"));
        let body: Vec<&str> = text.lines().skip_while(|l| *l != "end_header").skip(1).collect();
        assert_eq!(body, vec!["1 1 0 0 0 -1 2"]);
    }
}
