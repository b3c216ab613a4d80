use crate::language::Language;

/// Keys of the localized UI string table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Title,
    Start,
    Quit,
    Language,
    Audio,
    GamePaused,
    Resume,
    ShareResults,
    Copied,
    CopyFailed,
    ComeBackMessage,
    HintAlreadyUsed,
    HowToPlayTitle,
    WelcomeText,
    Instruction1,
    Instruction2,
    Instruction3,
    Instruction4,
    Score,
}

/// Looks up a UI string; every key has an entry for every language.
pub fn tr(language: Language, key: Key) -> &'static str {
    match language {
        Language::English => english(key),
        Language::Spanish => spanish(key),
    }
}

fn english(key: Key) -> &'static str {
    match key {
        Key::Title => "TypoSlinger",
        Key::Start => "Draw!",
        Key::Quit => "Quit",
        Key::Language => "Language",
        Key::Audio => "Audio",
        Key::GamePaused => "Game paused",
        Key::Resume => "Resume",
        Key::ShareResults => "Share results",
        Key::Copied => "Results copied to clipboard!",
        Key::CopyFailed => "Could not copy results",
        Key::ComeBackMessage => "Come back tomorrow for a new round of typos!",
        Key::HintAlreadyUsed => "You already used your hint this round",
        Key::HowToPlayTitle => "How to play",
        Key::WelcomeText => "Welcome, partner! Every sentence hides one misspelled word.",
        Key::Instruction1 => "Read the sentence on the sign.",
        Key::Instruction2 => "Shoot the misspelled word before it gets away.",
        Key::Instruction3 => "Stuck? Use one hint per round to narrow it down to three words.",
        Key::Instruction4 => "Six rounds, one shot each. Fastest gun wins.",
        Key::Score => "Score",
    }
}

fn spanish(key: Key) -> &'static str {
    match key {
        Key::Title => "TypoSlinger",
        Key::Start => "¡Desenfunda!",
        Key::Quit => "Salir",
        Key::Language => "Idioma",
        Key::Audio => "Sonido",
        Key::GamePaused => "Juego en pausa",
        Key::Resume => "Continuar",
        Key::ShareResults => "Compartir resultados",
        Key::Copied => "¡Resultados copiados!",
        Key::CopyFailed => "No se pudieron copiar los resultados",
        Key::ComeBackMessage => "¡Vuelve mañana para una nueva ronda de erratas!",
        Key::HintAlreadyUsed => "Ya usaste tu pista en esta ronda",
        Key::HowToPlayTitle => "Cómo jugar",
        Key::WelcomeText => "¡Bienvenido, forastero! Cada frase esconde una palabra mal escrita.",
        Key::Instruction1 => "Lee la frase del letrero.",
        Key::Instruction2 => "Dispara a la palabra mal escrita antes de que escape.",
        Key::Instruction3 => "¿Atascado? Usa una pista por ronda para reducirla a tres palabras.",
        Key::Instruction4 => "Seis rondas, un disparo cada una. Gana el más rápido.",
        Key::Score => "Puntos",
    }
}
