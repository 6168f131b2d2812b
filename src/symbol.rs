//! Elements, percepts, and the shared symbol namespace.
//!
//! Every proposition in the knowledge base is keyed by a [`Symbol`], which is
//! either an [`Element`] (the ground-truth occupant of a cell) or a
//! [`Percept`] (an observable signal). Symbols carry a small stable integer id
//! that the proposition encoder packs into literals.

use std::fmt;

/// The ground-truth thing occupying a cell.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Element {
    Wumpus,
    Pit,
    Gold,
    PoisonousGas,
    HealingPotion,
    Agent,
    Safe,
}

impl Element {
    pub const ALL: [Element; 7] = [
        Element::Wumpus,
        Element::Pit,
        Element::Gold,
        Element::PoisonousGas,
        Element::HealingPotion,
        Element::Agent,
        Element::Safe,
    ];

    /// Elements that make a cell unsafe to enter.
    pub const HAZARDS: [Element; 3] = [Element::Wumpus, Element::Pit, Element::PoisonousGas];

    /// The percept this element causes in its 4-neighbors, if any.
    pub fn percept(self) -> Option<Percept> {
        match self {
            Element::Wumpus => Some(Percept::Stench),
            Element::Pit => Some(Percept::Breeze),
            Element::Gold => Some(Percept::Glow),
            Element::PoisonousGas => Some(Percept::Whiff),
            Element::HealingPotion | Element::Agent | Element::Safe => None,
        }
    }

    pub fn is_hazard(self) -> bool {
        matches!(self, Element::Wumpus | Element::Pit | Element::PoisonousGas)
    }

    /// Whether the agent can grab this element.
    pub fn is_pickup(self) -> bool {
        matches!(self, Element::Gold | Element::HealingPotion)
    }

    /// Whether the element takes part in closed-world negative sweeps.
    ///
    /// `Agent` and `Safe` mark an empty square and never appear in any rule.
    pub fn is_sweepable(self) -> bool {
        !matches!(self, Element::Agent | Element::Safe)
    }

    pub fn code(self) -> &'static str {
        match self {
            Element::Wumpus => "W",
            Element::Pit => "P",
            Element::Gold => "G",
            Element::PoisonousGas => "PG",
            Element::HealingPotion => "HP",
            Element::Agent => "A",
            Element::Safe => "-",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Element::Wumpus => "WUMPUS",
            Element::Pit => "PIT",
            Element::Gold => "GOLD",
            Element::PoisonousGas => "POISONOUS_GAS",
            Element::HealingPotion => "HEALING_POTION",
            Element::Agent => "AGENT",
            Element::Safe => "SAFE",
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// An observable sensory signal.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Percept {
    Breeze,
    Stench,
    Glow,
    Whiff,
    Scream,
}

impl Percept {
    pub const ALL: [Percept; 5] = [
        Percept::Breeze,
        Percept::Stench,
        Percept::Glow,
        Percept::Whiff,
        Percept::Scream,
    ];

    /// Standing percepts that have exactly one associated element.
    ///
    /// `Scream` is an event, not a standing percept, and is excluded.
    pub const INFERABLE: [Percept; 4] = [Percept::Stench, Percept::Breeze, Percept::Glow, Percept::Whiff];

    /// The element whose presence in a neighbor causes this percept.
    pub fn element(self) -> Option<Element> {
        match self {
            Percept::Stench => Some(Element::Wumpus),
            Percept::Breeze => Some(Element::Pit),
            Percept::Glow => Some(Element::Gold),
            Percept::Whiff => Some(Element::PoisonousGas),
            Percept::Scream => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Percept::Breeze => "B",
            Percept::Stench => "S",
            Percept::Glow => "GL",
            Percept::Whiff => "WF",
            Percept::Scream => "SC",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Percept::Breeze => "BREEZE",
            Percept::Stench => "STENCH",
            Percept::Glow => "GLOW",
            Percept::Whiff => "WHIFF",
            Percept::Scream => "SCREAM",
        }
    }
}

impl fmt::Display for Percept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Element and percept symbols share one namespace.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Symbol {
    Element(Element),
    Percept(Percept),
}

impl Symbol {
    pub const COUNT: usize = 12;

    /// All symbols, in id order.
    pub const ALL: [Symbol; Symbol::COUNT] = [
        Symbol::Element(Element::Wumpus),
        Symbol::Element(Element::Pit),
        Symbol::Element(Element::Gold),
        Symbol::Element(Element::PoisonousGas),
        Symbol::Element(Element::HealingPotion),
        Symbol::Element(Element::Agent),
        Symbol::Element(Element::Safe),
        Symbol::Percept(Percept::Breeze),
        Symbol::Percept(Percept::Stench),
        Symbol::Percept(Percept::Glow),
        Symbol::Percept(Percept::Whiff),
        Symbol::Percept(Percept::Scream),
    ];

    /// Stable id in `0..Symbol::COUNT`.
    pub fn id(self) -> usize {
        match self {
            Symbol::Element(Element::Wumpus) => 0,
            Symbol::Element(Element::Pit) => 1,
            Symbol::Element(Element::Gold) => 2,
            Symbol::Element(Element::PoisonousGas) => 3,
            Symbol::Element(Element::HealingPotion) => 4,
            Symbol::Element(Element::Agent) => 5,
            Symbol::Element(Element::Safe) => 6,
            Symbol::Percept(Percept::Breeze) => 7,
            Symbol::Percept(Percept::Stench) => 8,
            Symbol::Percept(Percept::Glow) => 9,
            Symbol::Percept(Percept::Whiff) => 10,
            Symbol::Percept(Percept::Scream) => 11,
        }
    }

    pub fn from_id(id: usize) -> Option<Symbol> {
        Symbol::ALL.get(id).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Symbol::Element(e) => e.name(),
            Symbol::Percept(p) => p.name(),
        }
    }
}

impl From<Element> for Symbol {
    fn from(element: Element) -> Self {
        Symbol::Element(element)
    }
}

impl From<Percept> for Symbol {
    fn from(percept: Percept) -> Self {
        Symbol::Percept(percept)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Element(e) => write!(f, "{}", e),
            Symbol::Percept(p) => write!(f, "{}", p),
        }
    }
}

/// Checks that the element/percept association is a bijection between the
/// inferable percepts and the elements that cause them.
pub fn associations_are_complete() -> bool {
    let forward = Percept::INFERABLE
        .iter()
        .all(|&p| p.element().and_then(Element::percept) == Some(p));
    let backward = Element::ALL
        .iter()
        .filter_map(|&e| e.percept().map(|p| (e, p)))
        .all(|(e, p)| Percept::INFERABLE.contains(&p) && p.element() == Some(e));
    let hazards = Element::HAZARDS.iter().all(|e| e.percept().is_some());
    forward && backward && hazards
}
