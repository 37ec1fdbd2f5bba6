//! Event details shown on the invitation and in the confirmation

use serde::Serialize;

/// Fixed facts about the event
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct EventDetails {
    pub name: &'static str,
    pub tagline: &'static str,
    pub about: &'static str,
    pub invitation_title: &'static str,
    pub invitation: &'static str,
    pub date: &'static str,
    pub hours: &'static str,
    pub venue: &'static str,
}

pub const EVENT: EventDetails = EventDetails {
    name: "Mega Evento MCB",
    tagline: "O Futuro é Agora",
    about: "O Futuro MCB é a instituição financeira que está a transformar vidas no norte de \
Moçambique, tornando os serviços financeiros acessíveis para todos, especialmente para micro \
e pequenas empresas e agricultores.",
    invitation_title: "Você está Convidado!",
    invitation: "Junte-se a nós para um dia extraordinário de conexões, oportunidades e \
celebração. Venha fazer parte desta jornada de transformação e descobrir como podemos \
construir juntos um futuro financeiro mais próspero.",
    date: "15 de Março de 2025",
    hours: "09:00 - 17:00",
    venue: "Nampula - Pavilhão de Desportos",
};

impl EventDetails {
    /// Closing line of the confirmation dialog
    pub fn farewell(&self) -> String {
        format!("Nos vemos em {}!", self.date)
    }
}
