//! Closed value sets used across the ARE extension.

hbs_core::string_enum! {
    /// Building element a construction is made for.
    pub enum ElementType {
        ExternalWall => "External Wall",
        InternalWall => "Internal Wall",
        FloorCeiling => "Floor Ceiling",
        Roof => "Roof",
        Window => "Window",
        Door => "Door",
        OpaqueLouvre => "Opaque Louvre",
        Skylight => "Skylight",
        RoofWindow => "Roof Window",
    }
}

hbs_core::string_enum! {
    /// What a shade object represents, for shading relationships.
    pub enum ShadeType {
        Eave => "Eave",
        OverhangBalcony => "Overhang or Balcony",
        Pergola => "Pergola",
        RoofOverOutdoorArea => "Roof Over Outdoor Area",
        Fence => "Fence",
        NeighbouringStructure => "Neighbouring Structure",
        FixedAwning => "Fixed Awning",
        OtherShade => "Other shade",
    }
}

hbs_core::string_enum! {
    /// Operator type of a window.
    pub enum WindowType {
        Awning => "Awning",
        Casement => "Casement",
        DoubleOrSingleHung => "Double or Single Hung",
        Louvre => "Louvre",
        Sliding => "Sliding",
        Other => "Other",
    }
}

hbs_core::string_enum! {
    /// Use of a zone. The first three are special zones outside the dwelling.
    pub enum ZoneType {
        OutdoorAir => "Outdoor Air",
        Neighbour => "Neighbour",
        Ground => "Ground",
        Living => "Living",
        Bedroom => "Bedroom",
        LivingKitchen => "Kitchen - Living",
        DayTime => "Day Time",
        Unconditioned => "Unconditioned",
        NightTime => "Night Time",
        Garage => "Garage",
        GarageConditioned => "Garage - conditioned",
        Corridor => "Corridor",
        RoofSpace => "Roof Space",
        Subfloor => "Subfloor",
        SharedBasementCarPark => "Shared Basement Car Park",
    }
}

hbs_core::string_enum! {
    /// Covering on the room side of a window.
    pub enum IndoorCoveringType {
        None => "None",
        HollandBlinds => "Holland Blinds",
        VenetianBlinds => "Venetian Blinds",
        VerticalBlinds => "Vertical Blinds",
        OpenWeaveDrapes => "Open Weave Drapes",
        ClosedWeaveDrapes => "Closed Weave Drapes",
    }
}

hbs_core::string_enum! {
    /// Covering on the outside of a window.
    pub enum OutdoorCoveringType {
        None => "None",
        Shutters => "Shutters",
        ExternalBlinds => "External Blinds",
        Awning => "Awning",
    }
}

hbs_core::string_enum! {
    /// Gap around a window frame.
    pub enum GapSizeType {
        Small => "Small",
        Medium => "Medium",
        Large => "Large",
    }
}

hbs_core::string_enum! {
    /// How exposed a roof is to wind and sky.
    pub enum RoofExposureType {
        Exposed => "Exposed",
        PartiallyExposed => "Partially Exposed",
        Protected => "Protected",
    }
}

hbs_core::string_enum! {
    /// Order in which the layers of an internal construction are read.
    pub enum LayerDirectionType {
        Forward => "Forward",
        Backward => "Backward",
    }
}

hbs_core::string_enum! {
    /// Air-leakage penetration through a face.
    pub enum PenetrationType {
        Chimney => "Chimney",
        Flue => "Flue",
        ExhaustFan => "Exhaust Fan",
        CeilingFan => "Ceiling Fan",
        Downlight => "Downlight",
        WallVent => "Wall Vent",
        Other => "Other",
    }
}

hbs_core::string_enum! {
    /// Terrain exposure of the dwelling site.
    pub enum DwellingExposureType {
        Exposed => "Exposed",
        Open => "Open",
        Suburban => "Suburban",
        Protected => "Protected",
    }
}

hbs_core::string_enum! {
    pub enum DwellingType {
        Detached => "Detached",
        SemiDetached => "Semi-Detached",
        Terrace => "Terrace",
        Townhouse => "Townhouse",
        Apartment => "Apartment",
    }
}

hbs_core::string_enum! {
    /// Building code class of the assessed building.
    pub enum BuildingClassType {
        Class1a => "Class 1a",
        Class1b => "Class 1b",
        Class2 => "Class 2",
        Class4 => "Class 4",
    }
}

hbs_core::string_enum! {
    /// Interest the assessor declares in the project.
    pub enum DeclarationOfInterestType {
        None => "None",
        Owner => "Owner",
        Builder => "Builder",
        Designer => "Designer",
        Other => "Other",
    }
}
