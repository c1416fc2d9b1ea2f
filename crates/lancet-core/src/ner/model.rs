use candle_core::{Result, Tensor};
use candle_nn::{Linear, Module, VarBuilder};
use candle_transformers::models::bert::{BertModel, Config};

/// A BERT encoder with a linear token-classification head.
pub struct TokenClassifier {
    bert: BertModel,
    classifier: Linear,
}

impl TokenClassifier {
    /// Load the model from safetensors.
    ///
    /// The checkpoint follows the usual token-classification export layout:
    /// encoder weights under the `bert` prefix, head weights under
    /// `classifier`.
    pub fn load(vb: VarBuilder, config: &Config, num_labels: usize) -> Result<Self> {
        let bert = BertModel::load(vb.pp("bert"), config)?;
        let classifier = candle_nn::linear(config.hidden_size, num_labels, vb.pp("classifier"))?;

        Ok(Self { bert, classifier })
    }

    /// Forward pass producing per-position label logits.
    ///
    /// `input_ids`, `token_type_ids`, `attention_mask`: `[batch, seq_len]`.
    /// Returns `[batch, seq_len, num_labels]`.
    pub fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: &Tensor,
    ) -> Result<Tensor> {
        let hidden_states = self
            .bert
            .forward(input_ids, token_type_ids, Some(attention_mask))?;
        self.classifier.forward(&hidden_states)
    }
}
