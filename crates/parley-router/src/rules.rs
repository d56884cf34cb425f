// SPDX-FileCopyrightText: 2026 Parley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keyword sets and ordered rule tables, plus the built-in vocabularies.
//!
//! Vocabularies are bilingual (Spanish and English) and matched as lower-case
//! substrings. Configuration may append keywords to any set; appending never
//! changes the order in which categories are evaluated.

/// A named, lower-cased list of keywords and phrases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSet {
    name: String,
    keywords: Vec<String>,
}

impl KeywordSet {
    /// Build a set, lower-casing keywords and dropping blanks and duplicates.
    pub fn new<I, S>(name: impl Into<String>, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self {
            name: name.into(),
            keywords: Vec::new(),
        };
        set.extend(keywords);
        set
    }

    /// Append keywords after the existing ones.
    pub fn extend<I, S>(&mut self, keywords: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for keyword in keywords {
            let keyword = keyword.as_ref().trim().to_lowercase();
            if !keyword.is_empty() && !self.keywords.contains(&keyword) {
                self.keywords.push(keyword);
            }
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// First keyword occurring in already-folded text.
    pub(crate) fn find_in(&self, folded: &str) -> Option<&str> {
        self.keywords
            .iter()
            .find(|k| folded.contains(k.as_str()))
            .map(String::as_str)
    }

    /// Whether already-folded text equals one of the keywords.
    pub(crate) fn contains_exact(&self, folded: &str) -> bool {
        self.keywords.iter().any(|k| k == folded)
    }
}

/// One `{category, keyword set}` entry of a [`RuleTable`].
#[derive(Debug, Clone)]
pub struct Rule<C> {
    pub category: C,
    pub keywords: KeywordSet,
}

/// Ordered rules evaluated top to bottom; the first match wins.
#[derive(Debug, Clone)]
pub struct RuleTable<C> {
    rules: Vec<Rule<C>>,
}

impl<C> Default for RuleTable<C> {
    fn default() -> Self {
        Self { rules: Vec::new() }
    }
}

impl<C> RuleTable<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule with the lowest priority so far.
    pub fn with_rule(mut self, category: C, keywords: KeywordSet) -> Self {
        self.rules.push(Rule { category, keywords });
        self
    }

    pub fn rules(&self) -> &[Rule<C>] {
        &self.rules
    }
}

impl<C: Copy + PartialEq> RuleTable<C> {

    pub fn get(&self, category: C) -> Option<&KeywordSet> {
        self.rules
            .iter()
            .find(|r| r.category == category)
            .map(|r| &r.keywords)
    }

    pub fn get_mut(&mut self, category: C) -> Option<&mut KeywordSet> {
        self.rules
            .iter_mut()
            .find(|r| r.category == category)
            .map(|r| &mut r.keywords)
    }

    /// Highest-priority category matching already-folded text, with the keyword that hit.
    pub(crate) fn first_match(&self, folded: &str) -> Option<(C, &str)> {
        self.rules
            .iter()
            .find_map(|r| r.keywords.find_in(folded).map(|k| (r.category, k)))
    }
}

/// Whole-message greetings, thanks, acknowledgements and farewells.
pub const SMALLTALK_PHRASES: &[&str] = &[
    // greetings
    "hola", "buenas", "buen dia", "buen día", "buenos dias", "buenos días", "hi", "hey",
    "hello", "que tal", "qué tal", "como estas", "cómo estás",
    // thanks
    "gracias", "muchas gracias", "thank you", "thanks",
    // acknowledgements
    "ok", "dale", "perfecto", "genial", "bueno", "entendido", "claro", "sí", "si", "no",
    // farewells
    "chau", "adiós", "adios", "bye", "hasta luego", "nos vemos", "see you",
];

/// Greeting words looked for anywhere in a short message.
pub const GREETING_KEYWORDS: &[&str] = &[
    "hola", "buenas", "buen dia", "buen día", "buenos dias", "buenos días", "hello", "hey",
    "hi", "que tal", "qué tal", "gracias", "thanks", "thank you", "chau", "adiós", "adios",
    "bye",
];

pub const SALES_KEYWORDS: &[&str] = &[
    // pricing
    "precio", "price", "plan", "planes", "plans", "cotización", "cotizar", "quote",
    "cuanto cuesta", "cuánto cuesta", "cuesta", "how much", "cuanto vale", "cuánto vale",
    "cost", "costo", "costos", "pricing",
    // purchase
    "comprar", "buy", "purchase", "contratar", "subscribe", "subscription", "suscribir",
    "suscripción", "suscripcion", "probar", "demo", "trial", "prueba gratis", "free trial",
    // comparison
    "vs", "versus", "diferencia entre", "difference between", "comparar", "compare",
    "cual es mejor", "which is better",
    // upgrade and limits
    "upgrade", "mejorar plan", "cambiar plan", "subir de plan", "más mensajes",
    "more messages", "sin crédito", "sin tokens", "out of credits", "límite", "limit",
    "alcanzado",
    // features
    "incluye", "includes", "tiene", "has", "viene con", "comes with", "ofrece", "offers",
    "funcionalidades", "features", "características",
    // business
    "licencia", "license", "factura", "invoice", "descuento", "discount", "oferta", "offer",
    // payment
    "pagar", "pay", "pago", "payment", "forma de pago", "payment method", "tarjeta", "card",
    "transferencia", "transfer",
];

pub const SUPPORT_KEYWORDS: &[&str] = &[
    // problems
    "no funciona", "not working", "doesn't work", "no me anda", "no puedo", "can't",
    "cannot", "no logro", "error", "bug", "problema", "problem", "falla", "fallo", "fails",
    "broken", "no responde", "no carga", "not loading",
    // help
    "ayuda", "help", "como hago", "cómo hago", "how do i", "necesito ayuda", "need help",
    "soporte", "support", "asistencia", "assistance",
    // setup
    "configurar", "configure", "setup", "instalar", "install", "conectar", "connect",
    "integrar", "integrate", "integración", "integration",
    // access
    "no puedo entrar", "can't login", "can't access", "login", "contraseña", "password",
    "olvidé", "forgot", "recuperar", "recover", "reset",
    // product surface
    "api", "webhook", "widget", "dashboard", "analytics", "leads", "mensajes", "messages",
    // urgency
    "urgente", "urgent", "rápido", "asap",
];

pub const FAQ_KEYWORDS: &[&str] = &[
    // definitions
    "qué es", "que es", "what is", "como funciona", "cómo funciona", "how does",
    "para que sirve", "para qué sirve", "what for",
    // capabilities
    "puede", "puedes", "can it", "can you", "sirve para", "used for", "hace", "does it",
    "permite", "allows",
    // limits
    "límite", "limite", "limit", "cuanto", "cuánto", "how much", "how many", "máximo",
    "maximo", "maximum", "mínimo", "minimo", "minimum",
    // hours and location
    "horario", "horarios", "hours", "schedule", "ubicación", "location", "dirección",
    "address", "donde", "dónde", "where", "cuando", "cuándo", "when", "abierto", "open",
    "cerrado", "closed",
    // general information
    "info", "información", "information", "detalles", "details", "explicame", "explícame",
    "explain",
];

/// Analytical and strategic vocabulary, plus professional domains.
pub const COMPLEXITY_HIGH_KEYWORDS: &[&str] = &[
    "analyze", "analiza", "compare", "compara", "evaluate", "evalúa", "strategy",
    "estrategia", "plan", "planifica", "recommend", "recomienda", "diagnostic", "diagnóstico",
    "complex", "complejo", "detailed", "detallado", "contract", "contrato", "legal",
    "financial", "financiero", "technical", "técnico", "architecture", "arquitectura",
];

/// Explanatory and descriptive vocabulary.
pub const COMPLEXITY_MEDIUM_KEYWORDS: &[&str] = &[
    "explain", "explica", "describe", "describes", "summarize", "resume", "list", "lista",
    "what is", "qué es", "how does", "cómo funciona", "difference", "diferencia",
    "advantages", "ventajas", "pros and cons",
];

/// Greetings and quick-info requests.
pub const COMPLEXITY_LOW_KEYWORDS: &[&str] = &[
    "hi", "hola", "hello", "hey", "thanks", "gracias", "yes", "sí", "no", "ok", "dale", "sure",
    "price", "precio", "hours", "horario", "location", "ubicación", "contact", "contacto",
    "address", "dirección",
];
