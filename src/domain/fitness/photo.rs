//! Progress photos and body measurements.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{PhotoId, ValidationError};

/// Optional body measurements taken alongside a photo.
///
/// Every value must be a finite, non-negative number; body fat is a
/// percentage and additionally capped at 100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Measurements {
    pub weight: Option<f64>,
    pub body_fat_percent: Option<f64>,
    pub chest: Option<f64>,
    pub waist: Option<f64>,
    pub hips: Option<f64>,
    pub arms: Option<f64>,
    pub thighs: Option<f64>,
}

impl Measurements {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields = [
            ("measurements.weight", self.weight),
            ("measurements.body_fat_percent", self.body_fat_percent),
            ("measurements.chest", self.chest),
            ("measurements.waist", self.waist),
            ("measurements.hips", self.hips),
            ("measurements.arms", self.arms),
            ("measurements.thighs", self.thighs),
        ];
        for (field, value) in fields {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Err(ValidationError::out_of_range(
                        field,
                        format!("must be a non-negative number, got {}", v),
                    ));
                }
            }
        }
        if let Some(fat) = self.body_fat_percent {
            if fat > 100.0 {
                return Err(ValidationError::out_of_range(
                    "measurements.body_fat_percent",
                    format!("must not exceed 100, got {}", fat),
                ));
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Input for attaching a progress photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProgressPhoto {
    pub captured_on: NaiveDate,
    pub image_ref: String,
    pub notes: Option<String>,
    pub measurements: Option<Measurements>,
}

/// A dated photo reference with optional notes and measurements.
///
/// `image_ref` is an opaque handle; the image bytes live elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressPhoto {
    pub id: PhotoId,
    pub captured_on: NaiveDate,
    pub image_ref: String,
    pub notes: Option<String>,
    pub measurements: Option<Measurements>,
}

impl ProgressPhoto {
    pub fn create(id: PhotoId, input: NewProgressPhoto) -> Result<Self, ValidationError> {
        let image_ref = input.image_ref.trim();
        if image_ref.is_empty() {
            return Err(ValidationError::empty_field("image_ref"));
        }
        let measurements = match input.measurements {
            Some(m) if m.is_empty() => None,
            Some(m) => {
                m.validate()?;
                Some(m)
            }
            None => None,
        };
        let notes = input
            .notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        Ok(Self {
            id,
            captured_on: input.captured_on,
            image_ref: image_ref.to_string(),
            notes,
            measurements,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> NewProgressPhoto {
        NewProgressPhoto {
            captured_on: NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
            image_ref: "photos/abc.jpg".to_string(),
            notes: Some("  week 6  ".to_string()),
            measurements: Some(Measurements {
                weight: Some(82.5),
                body_fat_percent: Some(18.0),
                ..Default::default()
            }),
        }
    }

    #[test]
    fn create_trims_notes_and_keeps_measurements() {
        let photo = ProgressPhoto::create(PhotoId::new(), input()).unwrap();
        assert_eq!(photo.notes.as_deref(), Some("week 6"));
        assert_eq!(photo.measurements.unwrap().weight, Some(82.5));
    }

    #[test]
    fn create_rejects_blank_image_ref() {
        let mut i = input();
        i.image_ref = " ".to_string();
        let err = ProgressPhoto::create(PhotoId::new(), i).unwrap_err();
        assert_eq!(err, ValidationError::empty_field("image_ref"));
    }

    #[test]
    fn negative_measurement_is_rejected() {
        let mut i = input();
        i.measurements = Some(Measurements {
            waist: Some(-1.0),
            ..Default::default()
        });
        let err = ProgressPhoto::create(PhotoId::new(), i).unwrap_err();
        assert_eq!(err.field(), "measurements.waist");
    }

    #[test]
    fn body_fat_over_hundred_is_rejected() {
        let m = Measurements {
            body_fat_percent: Some(120.0),
            ..Default::default()
        };
        assert_eq!(m.validate().unwrap_err().field(), "measurements.body_fat_percent");
    }

    #[test]
    fn empty_measurement_set_is_dropped() {
        let mut i = input();
        i.measurements = Some(Measurements::default());
        i.notes = Some("   ".to_string());
        let photo = ProgressPhoto::create(PhotoId::new(), i).unwrap();
        assert!(photo.measurements.is_none());
        assert!(photo.notes.is_none());
    }
}
