//! Call flow state machine
//!
//! The menu tree is a typed state enum plus a pure transition function, so
//! the routing table is testable without HTTP. Handler routes feed the
//! collected digit into `transition`; prompt routes render their menu
//! directly. The URL in each emitted document is the only continuity
//! between requests.

use super::markup::{IvrDocument, Prompt};

const GREETING: &str = "Welcome to our service. Press 1 for English. Press 2 for Spanish.";
const GREETING_RETRY: &str = "Please make a selection.";
const GREETING_NO_INPUT: &str = "We did not receive your selection. Please try again.";
const GREETING_INVALID: &str = "Invalid selection.";

/// Digits a two-way menu accepts
const MENU_DIGITS: &str = "12";

/// Per-locale prompt text
struct PromptSet {
    menu: &'static str,
    retry: &'static str,
    no_input: &'static str,
    invalid: &'static str,
    listen: &'static str,
    goodbye: &'static str,
    hold: &'static str,
    unavailable: &'static str,
}

const ENGLISH_PROMPTS: PromptSet = PromptSet {
    menu: "You have selected English. Press 1 to hear a message. Press 2 to speak with an associate.",
    retry: "Please make a selection.",
    no_input: "We did not receive your selection.",
    invalid: "Invalid selection.",
    listen: "Please listen to this message.",
    goodbye: "Thank you for calling. Goodbye.",
    hold: "Please hold while we connect you to an associate.",
    unavailable: "The associate is not available. Goodbye.",
};

const SPANISH_PROMPTS: PromptSet = PromptSet {
    menu: "Ha seleccionado español. Presione 1 para escuchar un mensaje. Presione 2 para hablar con un asociado.",
    retry: "Por favor, haga una selección.",
    no_input: "No recibimos su selección.",
    invalid: "Selección inválida.",
    listen: "Por favor, escuche este mensaje.",
    goodbye: "Gracias por llamar. Adiós.",
    hold: "Por favor, espere mientras lo conectamos con un asociado.",
    unavailable: "El asociado no está disponible. Adiós.",
};

/// Menu language, fixed after the initial selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    English,
    Spanish,
}

impl Locale {
    /// `language` attribute for Speak elements, where one is needed
    pub fn speak_language(&self) -> Option<&'static str> {
        match self {
            Locale::English => None,
            Locale::Spanish => Some("es-ES"),
        }
    }

    fn prompts(&self) -> &'static PromptSet {
        match self {
            Locale::English => &ENGLISH_PROMPTS,
            Locale::Spanish => &SPANISH_PROMPTS,
        }
    }
}

/// Every routable point in the call flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallState {
    /// Entry point: greeting plus language selection
    Welcome,
    /// Routes the language digit collected by `Welcome`
    LanguageSelect,
    /// Per-language options menu
    Menu(Locale),
    /// Routes the option digit collected by `Menu`
    MenuOption(Locale),
    /// Terminal state
    Hangup,
}

impl CallState {
    /// Route path the remote gateway uses to reach this state
    pub fn path(&self) -> &'static str {
        match self {
            CallState::Welcome => "/ivr/welcome",
            CallState::LanguageSelect => "/ivr/language-handler",
            CallState::Menu(Locale::English) => "/ivr/menu-english",
            CallState::Menu(Locale::Spanish) => "/ivr/menu-spanish",
            CallState::MenuOption(Locale::English) => "/ivr/english-handler",
            CallState::MenuOption(Locale::Spanish) => "/ivr/spanish-handler",
            CallState::Hangup => "/ivr/hangup",
        }
    }
}

/// Outcome of one callback: the state the emitted document leads to, and
/// the document itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub next: CallState,
    pub document: IvrDocument,
}

/// Stateless call-flow driver
pub struct CallFlow {
    base_url: String,
    associate_number: String,
    audio_file_url: String,
}

impl CallFlow {
    pub fn new(server_url: &str, associate_number: &str, audio_file_url: &str) -> Self {
        Self {
            base_url: server_url.trim_end_matches('/').to_string(),
            associate_number: associate_number.to_string(),
            audio_file_url: audio_file_url.to_string(),
        }
    }

    fn url(&self, state: CallState) -> String {
        format!("{}{}", self.base_url, state.path())
    }

    /// Entry-point document: greeting, language digit collection, and a
    /// self-redirect when no input arrives.
    pub fn welcome(&self) -> IvrDocument {
        IvrDocument::new()
            .speak(GREETING)
            .get_digits(
                self.url(CallState::LanguageSelect),
                MENU_DIGITS,
                Prompt::new(GREETING_RETRY, None),
            )
            .speak(GREETING_NO_INPUT)
            .redirect(self.url(CallState::Welcome))
    }

    /// Per-language options menu document.
    pub fn menu(&self, locale: Locale) -> IvrDocument {
        let prompts = locale.prompts();
        let language = locale.speak_language();

        IvrDocument::new()
            .speak_in(prompts.menu, language)
            .get_digits(
                self.url(CallState::MenuOption(locale)),
                MENU_DIGITS,
                Prompt::new(prompts.retry, language),
            )
            .speak_in(prompts.no_input, language)
            .redirect(self.url(CallState::Menu(locale)))
    }

    /// Unconditional hangup document.
    pub fn hangup(&self) -> IvrDocument {
        IvrDocument::new().hangup()
    }

    /// Pure transition function: current state plus collected digit.
    ///
    /// Timeout and wrong-digit input are indistinguishable here; both take
    /// the catch-all branch back to the most recent menu.
    pub fn transition(&self, state: CallState, digits: Option<&str>) -> Transition {
        match state {
            CallState::LanguageSelect => self.language_transition(digits),
            CallState::MenuOption(locale) => self.option_transition(locale, digits),
            // Prompt states re-prompt; their digits arrive at the handler
            // states named in their GetDigits action.
            CallState::Welcome => Transition {
                next: CallState::Welcome,
                document: self.welcome(),
            },
            CallState::Menu(locale) => Transition {
                next: CallState::Menu(locale),
                document: self.menu(locale),
            },
            CallState::Hangup => Transition {
                next: CallState::Hangup,
                document: self.hangup(),
            },
        }
    }

    fn language_transition(&self, digits: Option<&str>) -> Transition {
        match digits {
            Some("1") => self.redirect_to(CallState::Menu(Locale::English)),
            Some("2") => self.redirect_to(CallState::Menu(Locale::Spanish)),
            _ => Transition {
                next: CallState::Welcome,
                document: IvrDocument::new()
                    .speak(GREETING_INVALID)
                    .redirect(self.url(CallState::Welcome)),
            },
        }
    }

    fn option_transition(&self, locale: Locale, digits: Option<&str>) -> Transition {
        let prompts = locale.prompts();
        let language = locale.speak_language();

        match digits {
            Some("1") => Transition {
                next: CallState::Hangup,
                document: IvrDocument::new()
                    .speak_in(prompts.listen, language)
                    .play(&self.audio_file_url)
                    .speak_in(prompts.goodbye, language)
                    .hangup(),
            },
            Some("2") => Transition {
                next: CallState::Hangup,
                document: IvrDocument::new()
                    .speak_in(prompts.hold, language)
                    .dial(&self.associate_number)
                    .speak_in(prompts.unavailable, language)
                    .hangup(),
            },
            // Invalid selection returns to this locale's menu, never to
            // the welcome state.
            _ => Transition {
                next: CallState::Menu(locale),
                document: IvrDocument::new()
                    .speak_in(prompts.invalid, language)
                    .redirect(self.url(CallState::Menu(locale))),
            },
        }
    }

    fn redirect_to(&self, state: CallState) -> Transition {
        Transition {
            next: state,
            document: IvrDocument::new().redirect(self.url(state)),
        }
    }
}
