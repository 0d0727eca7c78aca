use std::io::Write;

use crate::common::error::*;
use crate::scene::SceneWriter;
use crate::scene::types::*;


/// Scene and caption as pretty printed JSON
pub struct JsonWriter;

impl SceneWriter for JsonWriter {
    fn write(&self, computation: &Computation, out: &mut dyn Write) -> GeoResult<()> {
        serde_json::to_writer_pretty(&mut *out, computation)?;
        out.write_all(b"\n")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::Component;
    use crate::widgets::timezone::*;
    use crate::common::types::*;

    #[test]
    fn writes_scene_and_caption() {
        let c = TimeZoneCalculator::compute(TimeZoneInput {
            base_hour: Some(12),
            base: TimeZoneOffset::UTC,
            target: TimeZoneOffset::new(-6).unwrap(),
        });
        let mut buf: Vec<u8> = vec![];
        JsonWriter.write(&c, &mut buf).unwrap();
        let v: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(v["caption"]["segments"][0]["text"], "If it is 12:00 in UTC, it is 06:00 in UTC-6.");
        assert_eq!(v["scene"]["view"]["projection"], "natural earth");
        assert_eq!(v["scene"]["primitives"].as_array().unwrap().len(), 1 + 25 + 2);
    }
}
