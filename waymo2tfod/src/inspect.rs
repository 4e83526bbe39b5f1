//! Statistics of a converted record file.

use crate::{common::*, convert::keys, example::ExampleExt};
use tfrecord::protobuf::feature::Kind;

/// The statistics of a file of detection records.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InspectSummary {
    pub num_records: usize,
    pub num_objects: usize,
    /// Object counts keyed by class text.
    pub class_counts: BTreeMap<String, usize>,
}

/// Reads every record in the file and counts the objects per class.
///
/// It fails if a record lacks a per-object feature or if the per-object
/// features have different lengths.
pub fn inspect_file<P>(path: P) -> Result<InspectSummary>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let reader = ExampleIter::open(path, RecordReaderConfig::default())
        .with_context(|| format!("failed to open '{}'", path.display()))?;

    let mut summary = InspectSummary::default();

    for (idx, example) in reader.enumerate() {
        let example = example.with_context(|| format!("failed to read record {}", idx))?;
        let texts = object_classes(&example).with_context(|| format!("invalid record {}", idx))?;

        summary.num_records += 1;
        summary.num_objects += texts.len();
        for text in texts {
            *summary.class_counts.entry(text).or_default() += 1;
        }
    }

    Ok(summary)
}

fn object_classes(example: &Example) -> Result<Vec<String>> {
    let get_len = |key: &str| -> Result<usize> {
        let len = match example.feature(key).and_then(|feature| feature.kind.as_ref()) {
            Some(Kind::FloatList(list)) => list.value.len(),
            Some(Kind::Int64List(list)) => list.value.len(),
            Some(Kind::BytesList(list)) => list.value.len(),
            None => bail!("missing feature '{}'", key),
        };
        Ok(len)
    };

    let lens = [
        keys::BBOX_MIN_X,
        keys::BBOX_MAX_X,
        keys::BBOX_MIN_Y,
        keys::BBOX_MAX_Y,
        keys::CLASS_LABEL,
        keys::CLASS_TEXT,
    ]
    .into_iter()
    .map(|key| Ok((key, get_len(key)?)))
    .collect::<Result<Vec<_>>>()?;

    let (_, expect) = lens[0];
    for &(key, len) in &lens[1..] {
        ensure!(
            len == expect,
            "feature '{}' has {} values, but '{}' has {}",
            key,
            len,
            keys::BBOX_MIN_X,
            expect
        );
    }

    let texts = example
        .bytes_list(keys::CLASS_TEXT)
        .ok_or_else(|| format_err!("feature '{}' is not a bytes list", keys::CLASS_TEXT))?
        .iter()
        .map(|text| String::from_utf8_lossy(text).into_owned())
        .collect();

    Ok(texts)
}
