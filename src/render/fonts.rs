use std::collections::HashMap;
use std::sync::Arc;

use usvg::fontdb;

use crate::card::layout::{FontFamily, FontWeight, TextStyle};
use crate::foundation::error::{CardError, CardResult};
use crate::render::backend::RenderSettings;

/// Face selection key: everything in a [`TextStyle`] except its size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FaceKey {
    /// Requested generic family.
    pub family: FontFamily,
    /// Requested weight.
    pub weight: FontWeight,
    /// Requested italic.
    pub italic: bool,
}

impl From<&TextStyle> for FaceKey {
    fn from(s: &TextStyle) -> Self {
        Self {
            family: s.family,
            weight: s.weight,
            italic: s.italic,
        }
    }
}

/// A concrete font face picked for a [`FaceKey`].
#[derive(Clone)]
pub struct ResolvedFont {
    /// Primary family name of the face.
    pub family: String,
    /// Raw font file bytes.
    pub bytes: Arc<Vec<u8>>,
    /// Face index within a collection file.
    pub index: u32,
    /// Actual weight of the face (100..=900).
    pub weight: u16,
    /// Whether the face is italic or oblique.
    pub italic: bool,
}

impl std::fmt::Debug for ResolvedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedFont")
            .field("family", &self.family)
            .field("bytes_len", &self.bytes.len())
            .field("index", &self.index)
            .field("weight", &self.weight)
            .field("italic", &self.italic)
            .finish()
    }
}

/// Font database used to resolve card text styles to font bytes.
pub struct FontBook {
    db: fontdb::Database,
    resolved: HashMap<FaceKey, ResolvedFont>,
}

impl std::fmt::Debug for FontBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontBook")
            .field("faces", &self.db.len())
            .field("resolved", &self.resolved.len())
            .finish()
    }
}

impl FontBook {
    /// Load fonts according to `settings`.
    pub fn new(settings: &RenderSettings) -> Self {
        let mut db = fontdb::Database::new();
        if settings.system_fonts {
            db.load_system_fonts();
        }
        for dir in &settings.font_dirs {
            db.load_fonts_dir(dir);
        }
        tracing::debug!(faces = db.len(), "font database loaded");
        Self {
            db,
            resolved: HashMap::new(),
        }
    }

    /// A book with no faces; every text style fails to resolve.
    pub fn empty() -> Self {
        Self {
            db: fontdb::Database::new(),
            resolved: HashMap::new(),
        }
    }

    /// Number of loaded faces.
    pub fn face_count(&self) -> usize {
        self.db.len()
    }

    /// Whether no face is loaded.
    pub fn is_empty(&self) -> bool {
        self.db.is_empty()
    }

    /// Pick a face for `key`.
    ///
    /// The generic families (requested, sans-serif, serif) are tried first. If none is installed,
    /// or the face found misses the requested weight or italic, the closest loaded face wins.
    pub fn resolve(&mut self, key: FaceKey) -> CardResult<ResolvedFont> {
        if let Some(f) = self.resolved.get(&key) {
            return Ok(f.clone());
        }

        let requested = match key.family {
            FontFamily::Cursive => fontdb::Family::Cursive,
            FontFamily::SansSerif => fontdb::Family::SansSerif,
            FontFamily::Serif => fontdb::Family::Serif,
        };
        let families = [requested, fontdb::Family::SansSerif, fontdb::Family::Serif];
        let weight = match key.weight {
            FontWeight::Normal => fontdb::Weight::NORMAL,
            FontWeight::Bold => fontdb::Weight::BOLD,
        };
        let style = if key.italic {
            fontdb::Style::Italic
        } else {
            fontdb::Style::Normal
        };
        let query = fontdb::Query {
            families: &families,
            weight,
            stretch: fontdb::Stretch::Normal,
            style,
        };

        let generic = self
            .db
            .query(&query)
            .filter(|id| self.face_matches(*id, weight, style));
        let id = match generic {
            Some(id) => id,
            None => {
                let id = self.closest_loaded_face(key, weight, style).ok_or_else(|| {
                    CardError::font("no font faces available (install fonts or set a font dir)")
                })?;
                tracing::debug!(?key, "generic family missing or mismatched, using closest face");
                id
            }
        };

        let face = self
            .db
            .face(id)
            .ok_or_else(|| CardError::font("resolved font face disappeared"))?;
        let family = face
            .families
            .first()
            .map(|(name, _)| name.clone())
            .unwrap_or_else(|| face.post_script_name.clone());
        let weight = face.weight.0;
        let italic = face.style != fontdb::Style::Normal;

        let (bytes, index) = self
            .db
            .with_face_data(id, |data, index| (data.to_vec(), index))
            .ok_or_else(|| CardError::font(format!("failed to read font data for '{family}'")))?;

        let out = ResolvedFont {
            family,
            bytes: Arc::new(bytes),
            index,
            weight,
            italic,
        };
        self.resolved.insert(key, out.clone());
        Ok(out)
    }

    fn face_matches(&self, id: fontdb::ID, weight: fontdb::Weight, style: fontdb::Style) -> bool {
        self.db.face(id).is_some_and(|face| {
            style_matches(face.style, style) && face.weight.0.abs_diff(weight.0) < 100
        })
    }

    /// Best face among all loaded families for the requested weight and style.
    ///
    /// Ranked by style match, weight match, a family name hinting at the generic family, then by
    /// not being a monospace or math face. Families are visited in name order; ties keep the first.
    fn closest_loaded_face(
        &self,
        key: FaceKey,
        weight: fontdb::Weight,
        style: fontdb::Style,
    ) -> Option<fontdb::ID> {
        let hint = match key.family {
            FontFamily::Serif => "Serif",
            FontFamily::SansSerif | FontFamily::Cursive => "Sans",
        };

        let mut names: Vec<&str> = self
            .db
            .faces()
            .filter_map(|f| f.families.first().map(|(name, _)| name.as_str()))
            .collect();
        names.sort_unstable();
        names.dedup();

        let mut best: Option<((bool, bool, bool, bool, std::cmp::Reverse<u16>), fontdb::ID)> =
            None;
        for name in names {
            let families = [fontdb::Family::Name(name)];
            let query = fontdb::Query {
                families: &families,
                weight,
                stretch: fontdb::Stretch::Normal,
                style,
            };
            let Some(id) = self.db.query(&query) else {
                continue;
            };
            let Some(face) = self.db.face(id) else {
                continue;
            };

            let style_ok = style_matches(face.style, style);
            let weight_gap = face.weight.0.abs_diff(weight.0);
            let special = ["Mono", "Math"].iter().any(|s| name.contains(s));
            let rank = (
                style_ok,
                weight_gap < 100,
                name.contains(hint),
                !special,
                std::cmp::Reverse(weight_gap),
            );
            if best.as_ref().is_none_or(|(r, _)| rank > *r) {
                best = Some((rank, id));
            }
        }

        best.map(|(_, id)| id)
            .or_else(|| self.db.faces().next().map(|f| f.id))
    }
}

/// Italic and oblique both satisfy an italic request.
fn style_matches(face: fontdb::Style, wanted: fontdb::Style) -> bool {
    (face == fontdb::Style::Normal) == (wanted == fontdb::Style::Normal)
}
