use bstr::{BStr, BString, ByteSlice};

use crate::{error::ProvenanceError, record::AnnotationRecord};

const ID: &str = "id";
const ARTEFACT: &str = "artefact";
const GROUP: &str = "group";
const VERSION: &str = "version";
const SOURCE_PROJECT_ID: &str = "sourceProjectId";
const CHILD_IDS: &str = "childIds";
const IS_DIRECT_DEPENDENCY: &str = "isDirectDependency";

const MEMBERS: [&str; 7] = [
    ID,
    ARTEFACT,
    GROUP,
    VERSION,
    SOURCE_PROJECT_ID,
    CHILD_IDS,
    IS_DIRECT_DEPENDENCY,
];

/// Typed view of the Classport provenance annotation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ProvenanceInfo {
    /// Artefact coordinate, `group:artefact:version`.
    pub id: BString,
    /// Artefact name.
    pub artefact: BString,
    /// Group the artefact is published under.
    pub group: BString,
    /// Artefact version.
    pub version: BString,
    /// Coordinate of the project that was built when the class was embedded.
    pub source_project_id: Option<BString>,
    /// Coordinates of the artefact's direct dependencies.
    pub child_ids: Vec<BString>,
}

impl ProvenanceInfo {
    /// Rebuilds the fields from a record's captured text run.
    ///
    /// The build tool writes `childIds` as its key followed by one text per
    /// child, so the run only alternates when there is exactly one child.
    /// The run is therefore walked against the known member names: a scalar
    /// member takes the next text whatever it is, `childIds` takes texts
    /// until the next member name. Unknown names are skipped. The first
    /// value of a repeated scalar member wins.
    ///
    /// # Errors
    ///
    /// Fails when `id`, `artefact`, `group` or `version` is absent.
    pub fn from_record(record: &AnnotationRecord) -> Result<Self, ProvenanceError> {
        Self::from_text_run(record.text_run.iter().map(|t| t.as_bstr()))
    }

    /// Same as [`ProvenanceInfo::from_record`], over any text sequence.
    ///
    /// # Errors
    ///
    /// Fails when `id`, `artefact`, `group` or `version` is absent.
    pub fn from_text_run<'t>(
        texts: impl IntoIterator<Item = &'t BStr>,
    ) -> Result<Self, ProvenanceError> {
        let mut id = None;
        let mut artefact = None;
        let mut group = None;
        let mut version = None;
        let mut source_project_id = None;
        let mut child_ids = Vec::new();
        let mut member: Option<&str> = None;

        for text in texts {
            let named = MEMBERS.iter().copied().find(|m| text == *m);
            let slot = match member {
                Some(CHILD_IDS) => match named {
                    Some(next) => {
                        member = Some(next);
                        continue;
                    }
                    None => {
                        child_ids.push(text.to_owned());
                        continue;
                    }
                },
                Some(m) => {
                    member = None;
                    match m {
                        ID => &mut id,
                        ARTEFACT => &mut artefact,
                        GROUP => &mut group,
                        VERSION => &mut version,
                        SOURCE_PROJECT_ID => &mut source_project_id,
                        // a text value under the boolean member carries nothing
                        _ => continue,
                    }
                }
                None => {
                    member = named;
                    continue;
                }
            };
            if slot.is_none() {
                *slot = Some(text.to_owned());
            }
        }

        Ok(Self {
            id: id.ok_or(ProvenanceError::MissingField(ID))?,
            artefact: artefact.ok_or(ProvenanceError::MissingField(ARTEFACT))?,
            group: group.ok_or(ProvenanceError::MissingField(GROUP))?,
            version: version.ok_or(ProvenanceError::MissingField(VERSION))?,
            source_project_id,
            child_ids,
        })
    }
}
