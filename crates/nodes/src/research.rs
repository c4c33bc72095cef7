//! Assembly of the standard research pipeline.

use std::sync::Arc;

use pipeline::{LlmProvider, NewsSource, PipelineName, UnitName};

use crate::{
    ArticleRetriever, ArticleSummarizer, Pipeline, RetrieverConfig, SummarizerConfig,
    TopicValidator, ValidatorConfig,
};

pub const RESEARCH_PIPELINE: &str = "research";
pub const VALIDATOR_UNIT: &str = "TopicValidator";
pub const RETRIEVER_UNIT: &str = "ArticleRetriever";
pub const SUMMARIZER_UNIT: &str = "ArticleSummarizer";

/// Per-unit options for [`research_pipeline`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResearchOptions {
    pub validator: ValidatorConfig,
    pub retriever: RetrieverConfig,
    pub summarizer: SummarizerConfig,
}

/// Builds the validate → retrieve → summarize pipeline.
pub fn research_pipeline(
    news: Arc<dyn NewsSource>,
    llm: Arc<dyn LlmProvider>,
    options: ResearchOptions,
) -> Pipeline {
    let stages = vec![
        TopicValidator::new(UnitName::from_static(VALIDATOR_UNIT), options.validator).into(),
        ArticleRetriever::new(UnitName::from_static(RETRIEVER_UNIT), options.retriever, news)
            .into(),
        ArticleSummarizer::new(UnitName::from_static(SUMMARIZER_UNIT), options.summarizer, llm)
            .into(),
    ];
    tracing::debug!(units = stages.len(), "Research pipeline assembled");
    Pipeline::new(PipelineName::from_static(RESEARCH_PIPELINE), stages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{record, ScriptedLlm, StaticNews};
    use crate::Stage;

    #[test]
    fn units_are_wired_in_order_with_their_options() {
        let options = ResearchOptions {
            retriever: RetrieverConfig { max_articles: 2 },
            ..ResearchOptions::default()
        };
        let pipeline = research_pipeline(
            Arc::new(StaticNews::new(vec![])),
            Arc::new(ScriptedLlm::default()),
            options,
        );

        let names: Vec<_> = pipeline.stages().iter().map(|s| s.name().as_str()).collect();
        assert_eq!(names, [VALIDATOR_UNIT, RETRIEVER_UNIT, SUMMARIZER_UNIT]);
        assert_eq!(pipeline.name().as_str(), RESEARCH_PIPELINE);
        match &pipeline.stages()[1] {
            Stage::Retrieve(unit) => assert_eq!(unit.config().max_articles, 2),
            other => panic!("unexpected stage {other}"),
        }
    }

    #[test]
    fn max_articles_limits_the_output() {
        let options = ResearchOptions {
            retriever: RetrieverConfig { max_articles: 2 },
            ..ResearchOptions::default()
        };
        let mut pipeline = research_pipeline(
            Arc::new(StaticNews::new((1..=4).map(record).collect())),
            Arc::new(ScriptedLlm::default()),
            options,
        );

        let summaries = pipeline.run("ocean acidification").unwrap().into_summaries().unwrap();
        assert_eq!(summaries.len(), 2);
    }
}
