use crate::error::{Result, StenosisError};
use crate::policy::{dominant_class_of, rank_verdicts};
use crate::preview::{FallbackReader, PreviewPipeline, PrimaryRenderer};
use crate::response::PredictionResponse;
use crate::types::{
    AggregationConfig, FinalDiagnosis, ModelResult, ModelVerdict, SeverityLabel, StenosisLookup,
};
use crate::upload::{PredictionService, UploadController};
use log::{debug, info, warn};

/// Turns a prediction response into a diagnosis view model
///
/// Pure transform: no I/O and no hidden state, so aggregating the same
/// response twice yields identical output.
///
/// # Example
///
/// ```
/// use stenoscope_core::{PredictionResponse, ResultAggregator, SeverityLabel};
///
/// let body = r#"{
///     "Sagittal T1": {"Probabilities": {"Severe": 0.6, "Moderate": 0.3, "Normal/Mild": 0.1}},
///     "Axial T2": {"Probabilities": {"Normal/Mild": 0.9, "Moderate": 0.05, "Severe": 0.05}},
///     "Sagittal T2/STIR": {"Probabilities": {"Moderate": 0.4, "Normal/Mild": 0.5, "Severe": 0.1}}
/// }"#;
/// let response = PredictionResponse::from_json_str(body).unwrap();
///
/// let diagnosis = ResultAggregator::default().aggregate(&response).unwrap();
///
/// assert_eq!(diagnosis.final_diagnosis.severity_class, SeverityLabel::Severe);
/// assert_eq!(diagnosis.final_diagnosis.supporting_model_name, "Sagittal T1");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ResultAggregator {
    config: AggregationConfig,
    lookup: StenosisLookup,
}

impl ResultAggregator {
    pub fn new(config: AggregationConfig, lookup: StenosisLookup) -> Self {
        Self { config, lookup }
    }

    pub fn config(&self) -> &AggregationConfig {
        &self.config
    }

    /// Aggregates every model in the response
    ///
    /// Models with an empty distribution are listed in
    /// [`Diagnosis::skipped`] and excluded from ranking.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The response has no models ([`StenosisError::EmptyResponse`])
    /// - No model has a usable distribution ([`StenosisError::NoVerdicts`])
    pub fn aggregate(&self, response: &PredictionResponse) -> Result<Diagnosis> {
        if response.is_empty() {
            return Err(StenosisError::EmptyResponse);
        }

        let models: Vec<ModelResult> = response
            .iter()
            .map(|(model_name, dist)| ModelResult {
                model_name: model_name.to_string(),
                stenosis_type: self.lookup.resolve(model_name),
                distribution: dist.clone(),
            })
            .collect();

        let mut verdicts = Vec::with_capacity(models.len());
        let mut skipped = Vec::new();
        for model in &models {
            match dominant_class_of(&model.distribution, &self.config) {
                Ok((dominant_class, dominant_probability)) => {
                    debug!(
                        "{} ({}): {} at {:.4}",
                        model.model_name, model.stenosis_type, dominant_class, dominant_probability
                    );
                    verdicts.push(ModelVerdict {
                        model_name: model.model_name.clone(),
                        dominant_class,
                        dominant_probability,
                        stenosis_type: model.stenosis_type,
                    });
                }
                Err(StenosisError::EmptyDistribution) => {
                    warn!("Skipping {}: empty probability distribution", model.model_name);
                    skipped.push(model.model_name.clone());
                }
                Err(e) => return Err(e),
            }
        }

        let final_diagnosis = FinalDiagnosis::from(rank_verdicts(&verdicts)?);

        Ok(Diagnosis {
            models,
            verdicts,
            skipped,
            final_diagnosis,
        })
    }
}

/// Submits the selected file and previews it concurrently
///
/// The prediction and the preview are independent channels: the returned
/// diagnosis is unaffected by how the preview ends, and the pipeline reaches
/// a terminal state whatever the service answers. Inspect the preview through
/// [`PreviewPipeline::state`] afterwards.
///
/// # Errors
///
/// Returns [`StenosisError::NoFileSelected`] without touching the pipeline
/// when nothing is selected, otherwise the prediction or aggregation error.
pub async fn run_session<S, R, F>(
    controller: &UploadController<S>,
    aggregator: &ResultAggregator,
    pipeline: &mut PreviewPipeline,
    renderer: &R,
    reader: &F,
) -> Result<Diagnosis>
where
    S: PredictionService,
    R: PrimaryRenderer,
    F: FallbackReader,
{
    let file = controller.selected().ok_or(StenosisError::NoFileSelected)?;

    let (prediction, preview) = tokio::join!(
        controller.submit(),
        pipeline.preview(file, renderer, reader),
    );
    info!("Preview finished in state {}", preview);

    prediction.and_then(|response| aggregator.aggregate(&response))
}

/// Aggregated diagnosis view model
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct Diagnosis {
    /// Every model in the response, in name order
    pub models: Vec<ModelResult>,

    /// One verdict per model with a non-empty distribution
    pub verdicts: Vec<ModelVerdict>,

    /// Models excluded because their distribution was empty
    pub skipped: Vec<String>,

    /// Overall result
    pub final_diagnosis: FinalDiagnosis,
}

impl Diagnosis {
    /// Verdict for one model
    pub fn verdict_for(&self, model_name: &str) -> Option<&ModelVerdict> {
        self.verdicts.iter().find(|v| v.model_name == model_name)
    }

    /// Row to highlight in a model's probability table
    pub fn highlight_for(&self, model_name: &str) -> Option<&SeverityLabel> {
        self.verdict_for(model_name).map(|v| &v.dominant_class)
    }

    /// Checks if a model produced the final diagnosis
    pub fn is_supporting_model(&self, model_name: &str) -> bool {
        self.final_diagnosis.supporting_model_name == model_name
    }
}
