//! Plivo XML document model
//!
//! Plivo XML has no conditional or looping constructs; every document
//! emitted here is a fully pre-rendered, linear sequence of elements.

/// Voice used for all text-to-speech prompts
const VOICE: &str = "WOMAN";

/// A spoken prompt, optionally tagged with a TTS language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub text: String,
    pub language: Option<String>,
}

impl Prompt {
    pub fn new(text: &str, language: Option<&str>) -> Self {
        Self {
            text: text.to_string(),
            language: language.map(str::to_string),
        }
    }
}

/// A single Plivo XML element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IvrElement {
    /// Text-to-speech prompt
    Speak(Prompt),
    /// Collect DTMF digits, then POST them to `action`
    GetDigits {
        action: String,
        timeout_secs: u8,
        num_digits: u8,
        valid_digits: String,
        retry_prompt: Prompt,
    },
    /// Play a pre-recorded audio asset
    Play { url: String },
    /// Bridge the call to another number
    Dial { number: String },
    /// Hand control to another state route
    Redirect { url: String },
    /// Terminate the call
    Hangup,
}

/// An ordered Plivo XML response document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IvrDocument {
    elements: Vec<IvrElement>,
}

impl IvrDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn speak(self, text: &str) -> Self {
        self.speak_in(text, None)
    }

    pub fn speak_in(mut self, text: &str, language: Option<&str>) -> Self {
        self.elements.push(IvrElement::Speak(Prompt::new(text, language)));
        self
    }

    /// Collect exactly one digit with a 10-second timeout; the gateway
    /// re-invokes `action` once digits are captured or the timeout elapses.
    pub fn get_digits(mut self, action: String, valid_digits: &str, retry_prompt: Prompt) -> Self {
        self.elements.push(IvrElement::GetDigits {
            action,
            timeout_secs: 10,
            num_digits: 1,
            valid_digits: valid_digits.to_string(),
            retry_prompt,
        });
        self
    }

    pub fn play(mut self, url: &str) -> Self {
        self.elements.push(IvrElement::Play {
            url: url.to_string(),
        });
        self
    }

    pub fn dial(mut self, number: &str) -> Self {
        self.elements.push(IvrElement::Dial {
            number: number.to_string(),
        });
        self
    }

    pub fn redirect(mut self, url: String) -> Self {
        self.elements.push(IvrElement::Redirect { url });
        self
    }

    pub fn hangup(mut self) -> Self {
        self.elements.push(IvrElement::Hangup);
        self
    }

    pub fn elements(&self) -> &[IvrElement] {
        &self.elements
    }

    /// Render the document as Plivo XML.
    pub fn to_xml(&self) -> String {
        let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<Response>\n");
        for element in &self.elements {
            render_element(&mut xml, element);
        }
        xml.push_str("</Response>");
        xml
    }
}

fn render_element(xml: &mut String, element: &IvrElement) {
    match element {
        IvrElement::Speak(prompt) => render_speak(xml, prompt, "    "),
        IvrElement::GetDigits {
            action,
            timeout_secs,
            num_digits,
            valid_digits,
            retry_prompt,
        } => {
            xml.push_str(&format!(
                "    <GetDigits action=\"{}\" method=\"POST\" timeout=\"{}\" numDigits=\"{}\" validDigits=\"{}\" redirect=\"true\">\n",
                escape_xml(action),
                timeout_secs,
                num_digits,
                escape_xml(valid_digits),
            ));
            render_speak(xml, retry_prompt, "        ");
            xml.push_str("    </GetDigits>\n");
        }
        IvrElement::Play { url } => {
            xml.push_str(&format!("    <Play>{}</Play>\n", escape_xml(url)));
        }
        IvrElement::Dial { number } => {
            xml.push_str(&format!("    <Dial>{}</Dial>\n", escape_xml(number)));
        }
        IvrElement::Redirect { url } => {
            xml.push_str(&format!("    <Redirect>{}</Redirect>\n", escape_xml(url)));
        }
        IvrElement::Hangup => {
            xml.push_str("    <Hangup/>\n");
        }
    }
}

fn render_speak(xml: &mut String, prompt: &Prompt, indent: &str) {
    match &prompt.language {
        Some(language) => xml.push_str(&format!(
            "{indent}<Speak voice=\"{VOICE}\" language=\"{}\">{}</Speak>\n",
            escape_xml(language),
            escape_xml(&prompt.text),
        )),
        None => xml.push_str(&format!(
            "{indent}<Speak voice=\"{VOICE}\">{}</Speak>\n",
            escape_xml(&prompt.text),
        )),
    }
}

fn escape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
