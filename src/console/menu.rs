use std::fmt;

/// Entries of the numbered menu, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuChoice {
    PlaceOrder,
    OrderBook,
    Position,
    OpenOrders,
    CancelOrder,
    ModifyOrder,
    ListInstruments,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 8] = [
        MenuChoice::PlaceOrder,
        MenuChoice::OrderBook,
        MenuChoice::Position,
        MenuChoice::OpenOrders,
        MenuChoice::CancelOrder,
        MenuChoice::ModifyOrder,
        MenuChoice::ListInstruments,
        MenuChoice::Exit,
    ];

    pub fn number(&self) -> u8 {
        match self {
            MenuChoice::PlaceOrder => 1,
            MenuChoice::OrderBook => 2,
            MenuChoice::Position => 3,
            MenuChoice::OpenOrders => 4,
            MenuChoice::CancelOrder => 5,
            MenuChoice::ModifyOrder => 6,
            MenuChoice::ListInstruments => 7,
            MenuChoice::Exit => 0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::PlaceOrder => "Place New Order",
            MenuChoice::OrderBook => "Get Order Book",
            MenuChoice::Position => "Get Position",
            MenuChoice::OpenOrders => "Get Open Orders",
            MenuChoice::CancelOrder => "Cancel Order",
            MenuChoice::ModifyOrder => "Modify Order",
            MenuChoice::ListInstruments => "List Available Instruments",
            MenuChoice::Exit => "Exit",
        }
    }

    pub fn parse(token: &str) -> Option<Self> {
        let number: u8 = token.trim().parse().ok()?;
        Self::ALL.into_iter().find(|choice| choice.number() == number)
    }
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
