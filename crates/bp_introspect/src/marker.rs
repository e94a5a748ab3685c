use bitflags::bitflags;

use crate::config::PlannerConfig;

bitflags! {
    /// Exclusion markers of a declaration, normalized from annotation names.
    ///
    /// Any set flag excludes the declaration from serialization.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct ExclusionMarkers: u8 {
        /// An explicit-ignore annotation, e.g. `XmlTransient`.
        const IGNORE = 1 << 0;
        /// Excluded from storage, either by the transience flag or by a
        /// transience annotation.
        const TRANSIENT = 1 << 1;
    }
}

impl ExclusionMarkers {
    /// Normalizes the annotations and transience flag of a declaration.
    ///
    /// Annotation names may be written with a path (`serde::skip`,
    /// `javax.xml.XmlTransient`); only the last segment is compared against
    /// the configured vocabulary.
    pub fn from_declaration(annotations: &[&str], transient: bool, cfg: &PlannerConfig) -> Self {
        let mut markers = Self::empty();
        if transient {
            markers |= Self::TRANSIENT;
        }
        for annotation in annotations {
            let simple = simple_name(annotation);
            if cfg.ignore_markers.iter().any(|m| m == simple) {
                markers |= Self::IGNORE;
            }
            if cfg.transient_markers.iter().any(|m| m == simple) {
                markers |= Self::TRANSIENT;
            }
        }
        markers
    }

    /// Returns `true` if the declaration must not be serialized.
    #[inline]
    pub fn excludes(self) -> bool {
        !self.is_empty()
    }
}

fn simple_name(annotation: &str) -> &str {
    let annotation = annotation.trim().trim_start_matches('@');
    annotation
        .rsplit(['.', ':'])
        .next()
        .unwrap_or(annotation)
}
