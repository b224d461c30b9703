//! CLI commands

use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};
use serde_json::Value;
use tinyyummy_core::{AdminGuard, Guard, GuardDecision, TokenStore, UserOnlyGuard};
use tinyyummy_http::ApiClient;
use tinyyummy_http::services::{
    AuthService, BlogService, CartService, FoodService, OrderService, ProductService,
    ShippingService, WishlistService,
};
use tinyyummy_http::types::{LoginRequest, Page, ProductQuery, RegisterRequest, ShippingFeeRequest};
use tracing::info;

/// What every command gets to work with
pub struct AppContext {
    pub client: ApiClient,
    pub store: TokenStore,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in with email and password
    Login {
        #[arg(long)]
        email: String,

        #[arg(long, env = "TINYYUMMY_PASSWORD", hide_env_values = true)]
        password: String,

        /// Keep the session after this process exits
        #[arg(long)]
        remember_me: bool,
    },

    /// Sign out and forget the stored session
    Logout,

    /// Create an account
    Register {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long, env = "TINYYUMMY_PASSWORD", hide_env_values = true)]
        password: String,

        /// Code received by email, see `otp send`
        #[arg(long)]
        otp: Option<String>,
    },

    /// One-time email codes
    Otp {
        #[command(subcommand)]
        command: OtpCommands,
    },

    /// Show the stored session
    Whoami,

    /// Check whether the stored session may open a protected area
    Guard {
        #[arg(value_enum)]
        area: GuardArea,
    },

    /// Your orders
    Orders {
        #[command(subcommand)]
        command: OrderCommands,
    },

    /// Your shopping cart
    Cart {
        #[command(subcommand)]
        command: CartCommands,
    },

    /// Your wishlist
    Wishlist {
        #[command(subcommand)]
        command: WishlistCommands,
    },

    /// Browse the product catalogue
    Products {
        #[command(flatten)]
        page: PageArgs,

        #[arg(long)]
        search: Option<String>,

        #[arg(long)]
        category: Option<String>,
    },

    /// Browse blog posts
    Blogs {
        #[command(flatten)]
        page: PageArgs,
    },

    /// Browse foods
    Foods {
        #[command(flatten)]
        page: PageArgs,
    },

    /// Quote a delivery fee
    ShippingFee {
        #[arg(long)]
        district: u32,

        #[arg(long)]
        ward: String,

        /// Parcel weight in grams
        #[arg(long)]
        weight: u32,
    },
}

#[derive(Subcommand)]
pub enum OtpCommands {
    Send {
        #[arg(long)]
        email: String,
    },
    Verify {
        #[arg(long)]
        email: String,
        #[arg(long)]
        otp: String,
    },
}

#[derive(Subcommand)]
pub enum OrderCommands {
    List {
        #[command(flatten)]
        page: PageArgs,
    },
    Show {
        id: String,
    },
    Status {
        id: String,
    },
    Cancel {
        id: String,
    },
}

#[derive(Subcommand)]
pub enum CartCommands {
    Show,
    Add {
        product_id: String,
        #[arg(long, default_value = "1")]
        quantity: u32,
    },
    Remove {
        item_id: String,
    },
}

#[derive(Subcommand)]
pub enum WishlistCommands {
    List,
    Add { product_id: String },
    Remove { product_id: String },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum GuardArea {
    /// Back-office pages
    Admin,
    /// Customer-only pages such as cart and checkout
    UserOnly,
}

#[derive(Args, Clone, Copy, Debug)]
pub struct PageArgs {
    #[arg(long, default_value = "1")]
    page: u32,

    #[arg(long, default_value = "10")]
    limit: u32,
}

impl From<PageArgs> for Page {
    fn from(args: PageArgs) -> Self {
        Page::new(args.page, args.limit)
    }
}

impl Commands {
    pub async fn execute(self, ctx: &AppContext) -> Result<()> {
        let client = ctx.client.clone();

        match self {
            Commands::Login {
                email,
                password,
                remember_me,
            } => {
                let session = AuthService::new(client)
                    .login(&LoginRequest { email, password }, remember_me)
                    .await?;
                info!(role = %session.role, "Login succeeded");
                println!("Signed in as {} ({})", session.name, session.role);
                Ok(())
            }
            Commands::Logout => {
                AuthService::new(client).logout().await?;
                println!("Signed out");
                Ok(())
            }
            Commands::Register {
                name,
                email,
                password,
                otp,
            } => print_json(
                AuthService::new(client)
                    .register(&RegisterRequest {
                        name,
                        email,
                        password,
                        otp,
                    })
                    .await?,
            ),
            Commands::Otp { command } => {
                let auth = AuthService::new(client);
                let response = match command {
                    OtpCommands::Send { email } => auth.send_otp(email).await?,
                    OtpCommands::Verify { email, otp } => auth.verify_otp(email, otp).await?,
                };
                print_json(response)
            }
            Commands::Whoami => {
                let snapshot = ctx.store.snapshot();
                if snapshot.is_authenticated() {
                    println!(
                        "{} <{}> role={}",
                        snapshot.name.as_deref().unwrap_or("-"),
                        snapshot.email.as_deref().unwrap_or("-"),
                        snapshot.role.map_or("-", |role| role.as_str()),
                    );
                } else {
                    println!("Not signed in");
                }
                Ok(())
            }
            Commands::Guard { area } => {
                let decision = match area {
                    GuardArea::Admin => AdminGuard.check_store(&ctx.store),
                    GuardArea::UserOnly => UserOnlyGuard.check_store(&ctx.store),
                };
                match decision {
                    GuardDecision::Render => println!("allowed"),
                    GuardDecision::Redirect(route) => println!("redirect {route}"),
                }
                Ok(())
            }
            Commands::Orders { command } => {
                let orders = OrderService::new(client);
                let response = match command {
                    OrderCommands::List { page } => orders.list(page.into()).await?,
                    OrderCommands::Show { id } => orders.get(&id).await?,
                    OrderCommands::Status { id } => orders.status(&id).await?,
                    OrderCommands::Cancel { id } => orders.cancel(&id).await?,
                };
                print_json(response)
            }
            Commands::Cart { command } => {
                let cart = CartService::new(client);
                let response = match command {
                    CartCommands::Show => cart.get().await?,
                    CartCommands::Add {
                        product_id,
                        quantity,
                    } => cart.add_item(&product_id, quantity).await?,
                    CartCommands::Remove { item_id } => cart.remove_item(&item_id).await?,
                };
                print_json(response)
            }
            Commands::Wishlist { command } => {
                let wishlist = WishlistService::new(client);
                let response = match command {
                    WishlistCommands::List => wishlist.list().await?,
                    WishlistCommands::Add { product_id } => wishlist.add(&product_id).await?,
                    WishlistCommands::Remove { product_id } => {
                        wishlist.remove(&product_id).await?
                    }
                };
                print_json(response)
            }
            Commands::Products {
                page,
                search,
                category,
            } => {
                let query = ProductQuery {
                    search,
                    category_id: category,
                    ..Default::default()
                };
                print_json(ProductService::new(client).list(page.into(), &query).await?)
            }
            Commands::Blogs { page } => print_json(BlogService::new(client).list(page.into()).await?),
            Commands::Foods { page } => print_json(FoodService::new(client).list(page.into()).await?),
            Commands::ShippingFee {
                district,
                ward,
                weight,
            } => print_json(
                ShippingService::new(client)
                    .fee(&ShippingFeeRequest {
                        to_district_id: district,
                        to_ward_code: ward,
                        weight,
                        insurance_value: None,
                    })
                    .await?,
            ),
        }
    }
}

fn print_json(value: Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
