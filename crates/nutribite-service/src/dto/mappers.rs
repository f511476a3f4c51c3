//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use chrono::Utc;
use nutribite_core::{
    is_effectively_banned, Conversation, Courier, Customer, Delivery, Message, Notification,
    Order, OrderItem, Recipe, User,
};

use super::responses::{
    AdminUserResponse, ConversationResponse, CourierResponse, CustomerResponse,
    DeliveryResponse, MessageResponse, NotificationResponse, OrderItemResponse, OrderResponse,
    RecipeResponse, SessionResponse, UserResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            user_type: user.user_type,
            status: user.status.as_ref().map(|s| s.as_str().to_string()),
            last_seen: user.last_seen,
            created_at: user.created_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl From<&User> for AdminUserResponse {
    fn from(user: &User) -> Self {
        Self {
            user: UserResponse::from(user),
            ban_effective_at: user.ban_effective_at,
            banned_at: user.banned_at,
            ban_reason: user.ban_reason.clone(),
            effectively_banned: is_effectively_banned(user, Utc::now()),
        }
    }
}

impl From<User> for AdminUserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl From<&User> for SessionResponse {
    fn from(user: &User) -> Self {
        Self {
            user: UserResponse::from(user),
        }
    }
}

// ============================================================================
// Customer / Courier Mappers
// ============================================================================

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            user_id: customer.user_id,
            address: customer.address,
            city: customer.city,
            dietary_preferences: customer.dietary_preferences,
            allergies: customer.allergies,
            updated_at: customer.updated_at,
        }
    }
}

impl From<Courier> for CourierResponse {
    fn from(courier: Courier) -> Self {
        Self {
            id: courier.id,
            user_id: courier.user_id,
            vehicle_type: courier.vehicle_type,
            available: courier.available,
            created_at: courier.created_at,
            user: None,
        }
    }
}

impl CourierResponse {
    pub fn with_user(mut self, user: &User) -> Self {
        self.user = Some(UserResponse::from(user));
        self
    }
}

// ============================================================================
// Order / Delivery Mappers
// ============================================================================

impl From<&OrderItem> for OrderItemResponse {
    fn from(item: &OrderItem) -> Self {
        Self {
            recipe_id: item.recipe_id,
            quantity: item.quantity,
            unit_price_cents: item.unit_price_cents,
            line_total_cents: item.line_total_cents(),
        }
    }
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            customer_id: order.customer_id,
            status: order.status,
            items: order.items.iter().map(OrderItemResponse::from).collect(),
            total_cents: order.total_cents,
            delivery_address: order.delivery_address,
            notes: order.notes,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

impl From<Delivery> for DeliveryResponse {
    fn from(delivery: Delivery) -> Self {
        Self {
            id: delivery.id,
            order_id: delivery.order_id,
            courier_id: delivery.courier_id,
            status: delivery.status,
            assigned_at: delivery.assigned_at,
            picked_up_at: delivery.picked_up_at,
            delivered_at: delivery.delivered_at,
            updated_at: delivery.updated_at,
        }
    }
}

// ============================================================================
// Recipe Mappers
// ============================================================================

impl From<Recipe> for RecipeResponse {
    fn from(recipe: Recipe) -> Self {
        Self {
            macro_calories: recipe.macro_calories(),
            id: recipe.id,
            title: recipe.title,
            description: recipe.description,
            ingredients: recipe.ingredients,
            calories: recipe.calories,
            protein_g: recipe.protein_g,
            carbs_g: recipe.carbs_g,
            fat_g: recipe.fat_g,
            price_cents: recipe.price_cents,
            tags: recipe.tags,
            image_url: recipe.image_url,
            created_at: recipe.created_at,
            updated_at: recipe.updated_at,
        }
    }
}

// ============================================================================
// Notification / Message Mappers
// ============================================================================

impl From<Notification> for NotificationResponse {
    fn from(notification: Notification) -> Self {
        Self {
            read: notification.is_read(),
            id: notification.id,
            title: notification.title,
            body: notification.body,
            read_at: notification.read_at,
            created_at: notification.created_at,
        }
    }
}

impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        Self {
            id: message.id,
            sender_id: message.sender_id,
            recipient_id: message.recipient_id,
            body: message.body,
            read_at: message.read_at,
            created_at: message.created_at,
        }
    }
}

impl From<Conversation> for ConversationResponse {
    fn from(conversation: Conversation) -> Self {
        Self {
            peer_id: conversation.peer_id,
            peer_name: conversation.peer_name,
            last_message: MessageResponse::from(conversation.last_message),
            unread_count: conversation.unread_count,
        }
    }
}
