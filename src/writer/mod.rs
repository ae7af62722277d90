//! Reflective std140 writer
//!
//! Walks a block's fields in declaration order, dispatches on each field's
//! kind, and appends the corresponding bytes to a caller-supplied buffer.
//! The byte count appended always equals [`BlockLayout::size_bytes`]; any
//! divergence fails loudly as a programming error.

pub mod value;

pub use value::FieldValue;

use crate::core::error::Error;
use crate::core::types::{Mat4, Result, Vec4};
use crate::layout::{BlockLayout, FieldDescriptor, FieldKind, UniformBlock};

/// Append-only cursor over a caller-supplied byte buffer.
///
/// Emits little-endian 4-byte floats. The writer never allocates backing
/// storage of its own; it only appends to the buffer it was handed.
pub struct Std140Writer<'a> {
    buf: &'a mut Vec<u8>,
    start: usize,
}

impl<'a> Std140Writer<'a> {
    /// Start writing at the buffer's current end
    pub fn new(buf: &'a mut Vec<u8>) -> Self {
        let start = buf.len();
        Self { buf, start }
    }

    /// Append one float
    pub fn put_f32(&mut self, v: f32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    /// Append a run of floats
    pub fn put_f32s(&mut self, values: &[f32]) {
        #[cfg(target_endian = "little")]
        self.buf.extend_from_slice(bytemuck::cast_slice(values));
        #[cfg(target_endian = "big")]
        for v in values {
            self.buf.extend_from_slice(&v.to_le_bytes());
        }
    }

    /// Append four floats from a vec4
    pub fn put_vec4(&mut self, v: Vec4) {
        self.put_f32s(&v.to_array());
    }

    /// Append a 4x4 matrix as four contiguous column vec4s
    pub fn put_mat4(&mut self, m: &Mat4) {
        self.put_f32s(&m.to_cols_array());
    }

    /// Append `count` zero floats
    pub fn put_zero_f32s(&mut self, count: usize) {
        for _ in 0..count {
            self.put_f32(0.0);
        }
    }

    /// Bytes appended since this writer was created
    pub fn bytes_written(&self) -> usize {
        self.buf.len() - self.start
    }
}

/// Pack `block` onto the end of `buf` in strict declaration order.
///
/// Appends exactly `block.layout().size_bytes()` bytes, recursing into
/// nested blocks depth-first. On any error the buffer is truncated back
/// to its original length, so partial output is never left behind.
///
/// # Example
/// ```
/// use ublock::blocks::frame::FrameBlock;
///
/// let mut buf = Vec::new();
/// ublock::writer::write_into(&mut buf, &FrameBlock::new(1.0, 0.016, 42)).unwrap();
/// assert_eq!(buf.len(), 16);
/// ```
pub fn write_into(buf: &mut Vec<u8>, block: &dyn UniformBlock) -> Result<()> {
    let layout = block.layout();
    let expected = layout.size_bytes();
    let start = buf.len();
    buf.reserve(expected);

    let result = {
        let mut writer = Std140Writer::new(buf);
        write_block(&mut writer, layout, block).map(|_| writer.bytes_written())
    };

    match result {
        Ok(written) if written == expected => Ok(()),
        Ok(written) => {
            buf.truncate(start);
            Err(Error::SizeMismatch {
                name: layout.name().to_string(),
                calculated: written,
                expected,
            })
        }
        Err(e) => {
            buf.truncate(start);
            Err(e)
        }
    }
}

fn write_block(
    writer: &mut Std140Writer<'_>,
    layout: &'static BlockLayout,
    block: &dyn UniformBlock,
) -> Result<()> {
    for (index, desc) in layout.fields().iter().enumerate() {
        write_field(writer, layout, desc, block.field(index))?;
    }
    Ok(())
}

fn write_field(
    writer: &mut Std140Writer<'_>,
    layout: &'static BlockLayout,
    desc: &FieldDescriptor,
    value: FieldValue<'_>,
) -> Result<()> {
    match (desc.kind(), value) {
        (FieldKind::Reserved, _) => {}

        (FieldKind::Vec4, FieldValue::Vec4(v)) => writer.put_vec4(v),
        // Absent vec4s write zeros so the buffer is never left short
        (FieldKind::Vec4, FieldValue::Missing) => writer.put_zero_f32s(4),

        (FieldKind::Mat4, FieldValue::Mat4(m)) => writer.put_mat4(&m),
        // Absent matrices fall back to identity, not zeros
        (FieldKind::Mat4, FieldValue::Missing) => writer.put_mat4(&Mat4::IDENTITY),

        (FieldKind::FloatArray { count, pad }, FieldValue::Floats(values)) => {
            if values.len() < count {
                return Err(shape_error(
                    layout,
                    desc,
                    format!("float slice has {} elements, need {count}", values.len()),
                ));
            }
            writer.put_f32s(&values[..count]);
            if pad && count % 4 != 0 {
                writer.put_zero_f32s(4 - count % 4);
            }
        }

        (FieldKind::Vec4Array { count }, FieldValue::Vec4Slice(values)) => {
            for v in values.iter().take(count) {
                writer.put_vec4(*v);
            }
            if values.len() < count {
                writer.put_zero_f32s((count - values.len()) * 4);
            }
        }
        (FieldKind::Vec4Array { count }, FieldValue::Missing) => {
            writer.put_zero_f32s(count * 4);
        }

        (FieldKind::Struct(declared), FieldValue::Struct(inst)) => {
            let actual = inst.layout();
            if !std::ptr::eq(declared, actual) {
                return Err(shape_error(
                    layout,
                    desc,
                    format!(
                        "nested block has layout '{}', declared '{}'",
                        actual.name(),
                        declared.name()
                    ),
                ));
            }
            write_block(writer, declared, inst)?;
        }

        (kind, value) => {
            return Err(shape_error(
                layout,
                desc,
                format!("{} value cannot satisfy {} field", value.label(), kind.label()),
            ));
        }
    }
    Ok(())
}

fn shape_error(layout: &BlockLayout, desc: &FieldDescriptor, detail: String) -> Error {
    Error::Shape {
        block: layout.name(),
        field: desc.name(),
        detail,
    }
}
