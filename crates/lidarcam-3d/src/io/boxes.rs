use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use super::{
    binary_config, decode_binary, for_each_text_record, input_format, parse_field, RecordError,
    RecordFormat,
};
use crate::bbox::{BoundingBox, Rect};

/// Binary layout of a bounding box: integer pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, bincode::Encode, bincode::Decode)]
struct BoxRecord {
    box_id: i32,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

const BOX_RECORD_BYTES: usize = 5 * std::mem::size_of::<i32>();

impl From<BoxRecord> for BoundingBox {
    fn from(r: BoxRecord) -> Self {
        BoundingBox::new(r.box_id, Rect::new(r.x, r.y, r.width, r.height))
    }
}

impl From<&BoundingBox> for BoxRecord {
    fn from(b: &BoundingBox) -> Self {
        Self {
            box_id: b.box_id,
            x: b.roi.x,
            y: b.roi.y,
            width: b.roi.width,
            height: b.roi.height,
        }
    }
}

/// Reason a region of interest cannot be used, if any.
fn invalid_roi_reason(roi: &Rect) -> Option<&'static str> {
    (roi.width < 0 || roi.height < 0).then_some("negative box size")
}

/// Read a bounding box file.
///
/// `.dat`/`.bin` files hold a little-endian `u64` box count followed by
/// `box_id x y width height` as `i32`. `.txt`/`.csv` files hold one `box_id x y width height`
/// box per line, all integers. Boxes with a negative size are rejected in both formats. The
/// returned boxes have no LiDAR points.
///
/// # Arguments
///
/// * `file_path` - The path to the bounding box file.
///
/// # Returns
///
/// The boxes in file order. A file without boxes is an error.
pub fn read_bounding_boxes(file_path: impl AsRef<Path>) -> Result<Vec<BoundingBox>, RecordError> {
    let file_path = file_path.as_ref();
    let format = input_format(file_path)?;

    let mut reader = BufReader::new(File::open(file_path)?);

    let boxes = match format {
        RecordFormat::Binary => {
            let mut bytes = Vec::new();
            reader.read_to_end(&mut bytes)?;
            let boxes = decode_binary::<BoxRecord>(&bytes, BOX_RECORD_BYTES)?
                .into_iter()
                .map(BoundingBox::from)
                .collect::<Vec<_>>();
            for (index, b) in boxes.iter().enumerate() {
                if let Some(reason) = invalid_roi_reason(&b.roi) {
                    return Err(RecordError::InvalidRecord {
                        index,
                        reason: reason.to_string(),
                    });
                }
            }
            boxes
        }
        RecordFormat::Text => {
            let mut boxes = Vec::new();
            for_each_text_record(reader, 5, |line, fields| {
                let roi = Rect::new(
                    parse_field(fields[1], "x", line)?,
                    parse_field(fields[2], "y", line)?,
                    parse_field(fields[3], "width", line)?,
                    parse_field(fields[4], "height", line)?,
                );
                if let Some(reason) = invalid_roi_reason(&roi) {
                    return Err(RecordError::Parse {
                        line,
                        reason: reason.to_string(),
                    });
                }
                boxes.push(BoundingBox::new(parse_field(fields[0], "box_id", line)?, roi));
                Ok(())
            })?;
            boxes
        }
    };

    if boxes.is_empty() {
        return Err(RecordError::EmptyRecords(file_path.to_path_buf()));
    }

    log::debug!("read {} bounding boxes from {}", boxes.len(), file_path.display());

    Ok(boxes)
}

/// Write a bounding box file in the format given by its extension.
///
/// The associated LiDAR points are not written.
///
/// # Arguments
///
/// * `file_path` - The path to the bounding box file.
/// * `boxes` - The boxes to write.
pub fn write_bounding_boxes(
    file_path: impl AsRef<Path>,
    boxes: &[BoundingBox],
) -> Result<(), RecordError> {
    let file_path = file_path.as_ref();
    let format = RecordFormat::from_path(file_path)?;

    let mut writer = BufWriter::new(File::create(file_path)?);

    match format {
        RecordFormat::Binary => {
            let records = boxes.iter().map(BoxRecord::from).collect::<Vec<_>>();
            bincode::encode_into_std_write(&records, &mut writer, binary_config())?;
        }
        RecordFormat::Text => {
            writeln!(writer, "# box_id x y width height")?;
            for b in boxes {
                writeln!(
                    writer,
                    "{} {} {} {} {}",
                    b.box_id, b.roi.x, b.roi.y, b.roi.width, b.roi.height
                )?;
            }
        }
    }

    writer.flush()?;

    Ok(())
}
