//! View titles and table labels in the supported languages.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Language {
    #[default]
    English,
    Spanish,
    French,
    German,
}

impl Language {
    pub const ALL: [Language; 4] = [Language::English, Language::Spanish, Language::French, Language::German];

    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
            Language::French => "fr",
            Language::German => "de",
        }
    }

    pub fn native_name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Español",
            Language::French => "Français",
            Language::German => "Deutsch",
        }
    }

    /// Unknown codes fall back to English. Region suffixes are ignored.
    pub fn from_code(code: &str) -> Self {
        code.parse().unwrap_or_default()
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let primary = s.trim().split(['-', '_']).next().unwrap_or("").to_lowercase();
        Language::ALL
            .into_iter()
            .find(|language| language.code() == primary)
            .ok_or_else(|| format!("unsupported language: {}", s))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.native_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKey {
    Inbox,
    Today,
    Upcoming,
    Tags,
    Completed,
    Settings,
    Calendar,
    Id,
    Title,
    Due,
    Category,
    Priority,
    Status,
    Name,
    Color,
    Tasks,
    Done,
    Open,
    Overdue,
    NoTasks,
}

/// Translated text for `key`.
pub fn translate(language: Language, key: TextKey) -> &'static str {
    use Language::*;
    use TextKey::*;

    match (key, language) {
        (Inbox, English) => "Inbox",
        (Inbox, Spanish) => "Bandeja de entrada",
        (Inbox, French) => "Boîte de réception",
        (Inbox, German) => "Eingang",

        (Today, English) => "Today",
        (Today, Spanish) => "Hoy",
        (Today, French) => "Aujourd'hui",
        (Today, German) => "Heute",

        (Upcoming, English) => "Upcoming",
        (Upcoming, Spanish) => "Próximas",
        (Upcoming, French) => "À venir",
        (Upcoming, German) => "Demnächst",

        (Tags, English) => "Tags",
        (Tags, Spanish) => "Etiquetas",
        (Tags, French) => "Étiquettes",
        (Tags, German) => "Schlagwörter",

        (Completed, English) => "Completed",
        (Completed, Spanish) => "Completadas",
        (Completed, French) => "Terminées",
        (Completed, German) => "Erledigt",

        (Settings, English) => "Settings",
        (Settings, Spanish) => "Ajustes",
        (Settings, French) => "Paramètres",
        (Settings, German) => "Einstellungen",

        (Calendar, English) => "Calendar",
        (Calendar, Spanish) => "Calendario",
        (Calendar, French) => "Calendrier",
        (Calendar, German) => "Kalender",

        (Id, _) => "ID",

        (Title, English) => "Title",
        (Title, Spanish) => "Título",
        (Title, French) => "Titre",
        (Title, German) => "Titel",

        (Due, English) => "Due",
        (Due, Spanish) => "Vence",
        (Due, French) => "Échéance",
        (Due, German) => "Fällig",

        (Category, English) => "Category",
        (Category, Spanish) => "Categoría",
        (Category, French) => "Catégorie",
        (Category, German) => "Kategorie",

        (Priority, English) => "Priority",
        (Priority, Spanish) => "Prioridad",
        (Priority, French) => "Priorité",
        (Priority, German) => "Priorität",

        (Status, English) => "Status",
        (Status, Spanish) => "Estado",
        (Status, French) => "Statut",
        (Status, German) => "Status",

        (Name, English) => "Name",
        (Name, Spanish) => "Nombre",
        (Name, French) => "Nom",
        (Name, German) => "Name",

        (Color, English) => "Color",
        (Color, Spanish) => "Color",
        (Color, French) => "Couleur",
        (Color, German) => "Farbe",

        (Tasks, English) => "Tasks",
        (Tasks, Spanish) => "Tareas",
        (Tasks, French) => "Tâches",
        (Tasks, German) => "Aufgaben",

        (Done, English) => "done",
        (Done, Spanish) => "hecha",
        (Done, French) => "terminée",
        (Done, German) => "erledigt",

        (Open, English) => "open",
        (Open, Spanish) => "pendiente",
        (Open, French) => "ouverte",
        (Open, German) => "offen",

        (Overdue, English) => "overdue",
        (Overdue, Spanish) => "vencida",
        (Overdue, French) => "en retard",
        (Overdue, German) => "überfällig",

        (NoTasks, English) => "No tasks here",
        (NoTasks, Spanish) => "No hay tareas",
        (NoTasks, French) => "Aucune tâche",
        (NoTasks, German) => "Keine Aufgaben",
    }
}
