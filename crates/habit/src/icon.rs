use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

#[derive(
    EnumString,
    VariantArray,
    Display,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
pub enum Icon {
    #[default]
    Activity,
    Book,
    Briefcase,
    Calendar,
    Camera,
    CheckCircle,
    Clock,
    Code,
    Coffee,
    Droplet,
    Dumbbell,
    Edit,
    FileText,
    Flag,
    Gift,
    Globe,
    Heart,
    Home,
    Image,
    Layers,
    Layout,
    Map,
    MessageCircle,
    Mic,
    Moon,
    Music,
    Package,
    PenTool,
    Phone,
    Play,
    Power,
    Printer,
    Radio,
    Save,
    Scissors,
    Search,
    Settings,
    Share,
    Shield,
    ShoppingBag,
    Smartphone,
    Smile,
    Speaker,
    Star,
    Sun,
    Tag,
    Target,
    Thermometer,
    ThumbsUp,
    Tool,
    Trash,
    Truck,
    Tv,
    Umbrella,
    User,
    Video,
    Voicemail,
    Volume2,
    Watch,
    Wifi,
    Zap,
}
