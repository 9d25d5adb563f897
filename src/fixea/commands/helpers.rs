use crate::commands::{Event, ObjectContext};
use crate::model::AttributeRecord;
use std::fmt::Write;

/// Values shorter than this are dumped in full.
const DUMP_FULL_BELOW: usize = 8;
const DUMP_EDGE: usize = 4;

/// Formats `value` as `xx xx xx xx / xx xx xx xx [len]`.
///
/// Returns `None` for an empty value.
pub fn hexdump(value: &[u8]) -> Option<String> {
    if value.is_empty() {
        return None;
    }

    let mut out = String::new();
    if value.len() < DUMP_FULL_BELOW {
        push_hex(&mut out, value);
    } else {
        push_hex(&mut out, &value[..DUMP_EDGE]);
        out.push_str("/ ");
        push_hex(&mut out, &value[value.len() - DUMP_EDGE..]);
    }
    let _ = write!(out, "[{}]", value.len());
    Some(out)
}

fn push_hex(out: &mut String, bytes: &[u8]) {
    for b in bytes {
        let _ = write!(out, "{:02x} ", b);
    }
}

/// Emit a dump of `record` when debug mode is on.
pub fn dump_record(ctx: &mut ObjectContext<'_>, record: &AttributeRecord) {
    if !ctx.options.debug {
        return;
    }
    if let Some(dump) = hexdump(&record.value) {
        ctx.emit(Event::Dump {
            name: record.name.clone(),
            dump,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Options;
    use std::path::{Path, PathBuf};

    #[test]
    fn short_values_are_dumped_in_full() {
        assert_eq!(
            hexdump(&[0x00, 0x46, 0x50, 0x01, 0x02]).unwrap(),
            "00 46 50 01 02 [5]"
        );
        assert_eq!(hexdump(&[0xff; 7]).unwrap(), "ff ff ff ff ff ff ff [7]");
    }

    #[test]
    fn long_values_show_both_ends() {
        let value: Vec<u8> = (0u8..8).collect();
        assert_eq!(hexdump(&value).unwrap(), "00 01 02 03 / 04 05 06 07 [8]");

        let value: Vec<u8> = (0u8..=200).collect();
        assert_eq!(hexdump(&value).unwrap(), "00 01 02 03 / c5 c6 c7 c8 [201]");
    }

    #[test]
    fn empty_values_are_not_dumped() {
        assert_eq!(hexdump(&[]), None);
    }

    #[test]
    fn dump_only_in_debug_mode() {
        let record = AttributeRecord::new("DosStream.rsrc", b"abc".to_vec());
        let mut events: Vec<(PathBuf, Event)> = Vec::new();

        let quiet = Options::check();
        dump_record(&mut ObjectContext::new(Path::new("/f"), &quiet, &mut events), &record);
        assert!(events.is_empty());

        let debug = Options::check().with_debug(true);
        dump_record(&mut ObjectContext::new(Path::new("/f"), &debug, &mut events), &record);
        assert_eq!(
            events,
            vec![(
                PathBuf::from("/f"),
                Event::Dump {
                    name: "DosStream.rsrc".into(),
                    dump: "61 62 63 [3]".into()
                }
            )]
        );
        assert_eq!(record.value, b"abc");
    }
}
