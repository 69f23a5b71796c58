use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use super::{
    binary_config, decode_binary, for_each_text_record, input_format, parse_coordinate, RecordError,
    RecordFormat,
};
use crate::pointcloud::LidarPoint;

/// Size in bytes of a binary LiDAR record.
const LIDAR_RECORD_BYTES: usize = 4 * std::mem::size_of::<f64>();

fn is_finite(p: &LidarPoint) -> bool {
    p.x.is_finite() && p.y.is_finite() && p.z.is_finite() && p.r.is_finite()
}

/// Read a LiDAR point file.
///
/// `.dat`/`.bin` files hold a little-endian `u64` point count followed by `x y z r` as `f64`.
/// `.txt`/`.csv` files hold one `x y z r` point per line. An empty file yields no points.
/// Infinite and NaN values are rejected in both formats.
///
/// # Arguments
///
/// * `file_path` - The path to the point file.
///
/// # Returns
///
/// The points in file order.
pub fn read_lidar_points(file_path: impl AsRef<Path>) -> Result<Vec<LidarPoint>, RecordError> {
    let file_path = file_path.as_ref();
    let format = input_format(file_path)?;

    let mut reader = BufReader::new(File::open(file_path)?);

    let points = match format {
        RecordFormat::Binary => {
            let mut bytes = Vec::new();
            reader.read_to_end(&mut bytes)?;
            let points = decode_binary::<LidarPoint>(&bytes, LIDAR_RECORD_BYTES)?;
            if let Some(index) = points.iter().position(|p| !is_finite(p)) {
                return Err(RecordError::InvalidRecord {
                    index,
                    reason: "non-finite coordinate".to_string(),
                });
            }
            points
        }
        RecordFormat::Text => {
            let mut points = Vec::new();
            for_each_text_record(reader, 4, |line, fields| {
                points.push(LidarPoint::new(
                    parse_coordinate(fields[0], "x", line)?,
                    parse_coordinate(fields[1], "y", line)?,
                    parse_coordinate(fields[2], "z", line)?,
                    parse_coordinate(fields[3], "r", line)?,
                ));
                Ok(())
            })?;
            points
        }
    };

    log::debug!("read {} lidar points from {}", points.len(), file_path.display());

    Ok(points)
}

/// Write a LiDAR point file in the format given by its extension.
///
/// # Arguments
///
/// * `file_path` - The path to the point file.
/// * `points` - The points to write.
pub fn write_lidar_points(
    file_path: impl AsRef<Path>,
    points: &[LidarPoint],
) -> Result<(), RecordError> {
    let file_path = file_path.as_ref();
    let format = RecordFormat::from_path(file_path)?;

    let mut writer = BufWriter::new(File::create(file_path)?);

    match format {
        RecordFormat::Binary => {
            bincode::encode_into_std_write(points, &mut writer, binary_config())?;
        }
        RecordFormat::Text => {
            writeln!(writer, "# x y z r")?;
            for p in points {
                writeln!(writer, "{} {} {} {}", p.x, p.y, p.z, p.r)?;
            }
        }
    }

    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_points() -> Vec<LidarPoint> {
        vec![
            LidarPoint::new(7.913, 0.751, -0.978, 0.21),
            LidarPoint::new(14.504, 1.114, -1.02, 0.0),
            LidarPoint::new(-3.1e-7, 1e12, 0.1, 1.0),
        ]
    }

    #[test]
    fn test_lidar_points_binary() -> Result<(), RecordError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("points.dat");

        let points = sample_points();
        write_lidar_points(&file_path, &points)?;

        let bytes = std::fs::read(&file_path)?;
        assert_eq!(bytes.len(), 8 + points.len() * LIDAR_RECORD_BYTES);
        assert_eq!(&bytes[..8], &(points.len() as u64).to_le_bytes());

        assert_eq!(read_lidar_points(&file_path)?, points);
        Ok(())
    }

    #[test]
    fn test_lidar_points_text() -> Result<(), RecordError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("points.txt");

        let points = sample_points();
        write_lidar_points(&file_path, &points)?;
        assert_eq!(read_lidar_points(&file_path)?, points);
        Ok(())
    }

    #[test]
    fn test_read_lidar_points_csv() -> Result<(), RecordError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("points.csv");
        std::fs::write(&file_path, "# x,y,z,r\n1,2,3,0.5\n")?;

        assert_eq!(
            read_lidar_points(&file_path)?,
            vec![LidarPoint::new(1.0, 2.0, 3.0, 0.5)]
        );
        Ok(())
    }

    #[test]
    fn test_read_lidar_points_empty() -> Result<(), RecordError> {
        let tmp_dir = tempfile::tempdir()?;

        let file_path = tmp_dir.path().join("empty.txt");
        std::fs::write(&file_path, "")?;
        assert!(read_lidar_points(&file_path)?.is_empty());

        let file_path = tmp_dir.path().join("empty.dat");
        write_lidar_points(&file_path, &[])?;
        assert!(read_lidar_points(&file_path)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_read_lidar_points_errors() -> Result<(), RecordError> {
        let tmp_dir = tempfile::tempdir()?;

        let res = read_lidar_points(tmp_dir.path().join("missing.dat"));
        assert!(matches!(res, Err(RecordError::FileDoesNotExist(_))));

        let file_path = tmp_dir.path().join("points.pcd");
        std::fs::write(&file_path, "")?;
        let res = read_lidar_points(&file_path);
        assert!(matches!(res, Err(RecordError::InvalidFileExtension(_))));

        let file_path = tmp_dir.path().join("short.dat");
        write_lidar_points(&file_path, &sample_points())?;
        let bytes = std::fs::read(&file_path)?;
        std::fs::write(&file_path, &bytes[..bytes.len() - 4])?;
        let res = read_lidar_points(&file_path);
        assert!(matches!(res, Err(RecordError::Truncated { .. })));

        let file_path = tmp_dir.path().join("bad.txt");
        std::fs::write(&file_path, "1 2 3 0.1\n1 2 three 0.1\n")?;
        let res = read_lidar_points(&file_path);
        assert!(matches!(res, Err(RecordError::Parse { line: 2, .. })));
        Ok(())
    }

    #[test]
    fn test_read_lidar_points_rejects_non_finite() -> Result<(), RecordError> {
        let tmp_dir = tempfile::tempdir()?;

        let file_path = tmp_dir.path().join("inf.txt");
        std::fs::write(&file_path, "1 2 3 0.1\ninf 0 0 0\n")?;
        let res = read_lidar_points(&file_path);
        assert!(matches!(res, Err(RecordError::Parse { line: 2, .. })));

        let file_path = tmp_dir.path().join("nan.csv");
        std::fs::write(&file_path, "1,NaN,3,0.1\n")?;
        let res = read_lidar_points(&file_path);
        assert!(matches!(res, Err(RecordError::Parse { line: 1, .. })));

        // the binary writer does not validate, the reader does
        let file_path = tmp_dir.path().join("nan.dat");
        let mut points = sample_points();
        points[1].z = f64::NAN;
        write_lidar_points(&file_path, &points)?;
        let res = read_lidar_points(&file_path);
        assert!(matches!(res, Err(RecordError::InvalidRecord { index: 1, .. })));
        Ok(())
    }
}
