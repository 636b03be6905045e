//! Mouse input for CDP page session.

use serde_json::json;
use tracing::debug;

use crate::cdp::error::CdpError;
use crate::cdp::protocol::{MouseButton, MouseEventType};

use super::core::PageSession;

impl PageSession {
    /// Move to and click at viewport coordinates.
    pub async fn click(&self, x: f64, y: f64) -> Result<(), CdpError> {
        self.mouse_event(MouseEventType::MouseMoved, x, y, MouseButton::None, 0)
            .await?;
        self.mouse_event(MouseEventType::MousePressed, x, y, MouseButton::Left, 1)
            .await?;
        self.mouse_event(MouseEventType::MouseReleased, x, y, MouseButton::Left, 1)
            .await?;

        debug!("Clicked at ({}, {})", x, y);
        Ok(())
    }

    async fn mouse_event(
        &self,
        event_type: MouseEventType,
        x: f64,
        y: f64,
        button: MouseButton,
        click_count: u32,
    ) -> Result<(), CdpError> {
        self.call(
            "Input.dispatchMouseEvent",
            Some(json!({
                "type": event_type,
                "x": x,
                "y": y,
                "button": button,
                "clickCount": click_count,
            })),
        )
        .await?;
        Ok(())
    }
}
