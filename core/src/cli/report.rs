use crate::api::Diagnosis;
use crate::error::StenosisError;
use crate::preview::PreviewState;
use std::fmt;

/// Note printed under the metadata-only preview
pub const METADATA_ONLY_NOTE: &str =
    "Note: Full image preview is not available, only DICOM metadata is shown.";

/// Text report formatter for an aggregated diagnosis
pub struct TextReport<'a> {
    diagnosis: &'a Diagnosis,
}

impl<'a> TextReport<'a> {
    /// Creates a new text report
    pub fn new(diagnosis: &'a Diagnosis) -> Self {
        Self { diagnosis }
    }
}

impl<'a> fmt::Display for TextReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Prediction Results")?;
        writeln!(f, "==================")?;
        writeln!(f)?;

        for model in &self.diagnosis.models {
            writeln!(f, "{} ({})", model.model_name, model.stenosis_type)?;
            if model.distribution.is_empty() {
                writeln!(f, "  No probabilities reported")?;
                writeln!(f)?;
                continue;
            }

            let highlight = self.diagnosis.highlight_for(&model.model_name);
            writeln!(f, "  {:<14} {:>11}", "Class", "Probability")?;
            for (label, p) in model.distribution.iter() {
                let marker = if highlight == Some(label) { "*" } else { " " };
                writeln!(
                    f,
                    "{} {:<14} {:>10.2}%",
                    marker,
                    label.simple_name(),
                    p * 100.0
                )?;
            }
            writeln!(f)?;
        }

        if !self.diagnosis.skipped.is_empty() {
            writeln!(f, "Skipped:        {}", self.diagnosis.skipped.join(", "))?;
            writeln!(f)?;
        }

        let final_diagnosis = &self.diagnosis.final_diagnosis;
        writeln!(f, "Final Diagnosis")?;
        writeln!(f, "---------------")?;
        writeln!(f, "Stenosis Type:  {}", final_diagnosis.stenosis_type)?;
        writeln!(f, "Severity:       {}", final_diagnosis.severity_class)?;
        writeln!(f, "From Model:     {}", final_diagnosis.supporting_model_name)?;

        Ok(())
    }
}

/// Text for an aggregation error
pub struct NoPredictionReport<'a> {
    error: &'a StenosisError,
}

impl<'a> NoPredictionReport<'a> {
    pub fn new(error: &'a StenosisError) -> Self {
        Self { error }
    }
}

impl<'a> fmt::Display for NoPredictionReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Prediction Results")?;
        writeln!(f, "==================")?;
        if self.error.is_no_prediction() {
            writeln!(f, "No prediction available")
        } else {
            writeln!(f, "No prediction available: {}", self.error)
        }
    }
}

/// Text report for the image preview
pub struct PreviewReport<'a> {
    state: &'a PreviewState,
    render_failure: Option<&'a str>,
}

impl<'a> PreviewReport<'a> {
    pub fn new(state: &'a PreviewState, render_failure: Option<&'a str>) -> Self {
        Self {
            state,
            render_failure,
        }
    }
}

impl<'a> fmt::Display for PreviewReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Image Preview")?;
        writeln!(f, "=============")?;

        match self.state {
            PreviewState::PrimaryRendered(snapshot) => {
                writeln!(
                    f,
                    "Rendered:       {} x {} pixels",
                    snapshot.width(),
                    snapshot.height()
                )?;
            }
            PreviewState::FallbackRendered(metadata) => {
                writeln!(f, "DICOM Information:")?;
                writeln!(f, "Patient Name:   {}", metadata.patient_name)?;
                writeln!(f, "Patient ID:     {}", metadata.patient_id)?;
                writeln!(f, "Study Date:     {}", metadata.study_date)?;
                writeln!(f, "Modality:       {}", metadata.modality)?;
                writeln!(f, "Image Size:     {}", metadata.image_size())?;
                writeln!(f)?;
                writeln!(f, "{}", METADATA_ONLY_NOTE)?;
            }
            PreviewState::FallbackFailed(message) => {
                writeln!(f, "Error: {}", message)?;
            }
            other if other.is_loading() => {
                writeln!(f, "Loading preview... ({})", other)?;
            }
            other => {
                writeln!(f, "Preview not ready ({})", other)?;
            }
        }

        if let Some(reason) = self.render_failure {
            writeln!(f, "Render failure: {}", reason)?;
        }

        Ok(())
    }
}
