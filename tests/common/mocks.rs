use async_trait::async_trait;
use dermascan::{
    Error, Result,
    diagnosis::LABEL_COUNT,
    llm::{ChatClient, ChatPrompt, Completion},
    model::Classifier,
    vision::ImageTensor,
};
use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

/// Classifier returning a fixed output vector and counting calls.
#[derive(Debug)]
pub struct StubClassifier {
    output: Result<Vec<f32>>,
    calls: AtomicUsize,
}

impl StubClassifier {
    pub fn with_output(output: Vec<f32>) -> Self {
        Self {
            output: Ok(output),
            calls: AtomicUsize::new(0),
        }
    }

    /// Puts `probability` at `index` and spreads the remainder evenly.
    pub fn confident(index: usize, probability: f32) -> Self {
        let rest = (1.0 - probability) / (LABEL_COUNT - 1) as f32;
        let mut output = vec![rest; LABEL_COUNT];
        output[index] = probability;
        Self::with_output(output)
    }

    pub fn with_error(error: Error) -> Self {
        Self {
            output: Err(error),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Classifier for StubClassifier {
    fn predict(&self, tensor: &ImageTensor) -> Result<Vec<f32>> {
        assert_eq!(tensor.as_slice().len(), 224 * 224 * 3);
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.output.clone()
    }
}

/// Chat client replaying a canned result and recording every prompt.
#[derive(Debug)]
pub struct MockChatClient {
    reply: Result<Completion>,
    prompts: Mutex<Vec<ChatPrompt>>,
}

impl MockChatClient {
    pub fn replying(content: &str) -> Self {
        Self::with_completion(Completion {
            content: content.to_string(),
            model: Some("deepseek-chat".to_string()),
            created: Some(serde_json::json!(1718000000)),
        })
    }

    pub fn with_completion(completion: Completion) -> Self {
        Self {
            reply: Ok(completion),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn with_error(error: Error) -> Self {
        Self {
            reply: Err(error),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn get_prompts(&self) -> Vec<ChatPrompt> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatClient for MockChatClient {
    async fn complete(&self, prompt: &ChatPrompt) -> Result<Completion> {
        self.prompts.lock().unwrap().push(prompt.clone());
        self.reply.clone()
    }
}
