//! Request and response shapes for the HTTP layer
//!
//! Requests carry their `validator` rules; responses are built from domain
//! entities through the `From` impls in [`mappers`].

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    AssignDeliveryRequest, BanUserRequest, ChangePasswordRequest, CreateCourierRequest,
    CreateNotificationRequest, CreateOrderRequest, CreateRecipeRequest, LoginMethod,
    LoginRequest, NotificationListQuery, OrderItemRequest, OrderListQuery, PageRequest,
    RecipeSearchQuery, RegisterRequest, SendMessageRequest, UpdateAvailabilityRequest,
    UpdateDeliveryStatusRequest, UpdateOrderStatusRequest, UpdateRecipeRequest, UpdateUserRequest,
    UpsertCustomerRequest, UserListQuery,
};

pub use responses::{
    AdminUserResponse, ConversationResponse, CourierResponse, CustomerResponse,
    DeliveryResponse, HealthChecks, HealthResponse, MessageResponse, NotificationResponse,
    OrderItemResponse, OrderResponse, PaginatedResponse, PaginationMeta, ReadinessResponse,
    RecipeResponse, SessionResponse, UpdatedCountResponse, UserResponse,
};
